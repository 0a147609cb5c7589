//! Command-line interface

use crate::engine::CipherModule;
use crate::host;
use clap::Parser;

#[derive(Parser)]
#[command(name = "rc4_arena")]
#[command(author = "rc4_arena Contributors")]
#[command(version = "1.0.0")]
#[command(
    about = "RC4 stream cipher over an arena-backed module boundary",
    long_about = "RC4 stream cipher over an arena-backed module boundary\n\nEncryption reads --input as UTF-8 text and prints lowercase hex.\nDecryption reads --input as hex and prints the recovered text."
)]
pub struct Cli {
    /// Encrypt: treat --input as UTF-8 text, print ciphertext as lowercase hex
    #[arg(long, conflicts_with = "decrypt")]
    pub encrypt: bool,

    /// Decrypt: treat --input as hex ciphertext, print recovered text
    #[arg(long, conflicts_with = "encrypt")]
    pub decrypt: bool,

    /// Input text (encrypt) or hex ciphertext (decrypt)
    #[arg(long)]
    pub input: Option<String>,

    /// Cipher key
    #[arg(long)]
    pub key: Option<String>,

    /// Arena capacity budget in bytes (default 16 MiB)
    #[arg(long)]
    pub capacity: Option<usize>,
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.encrypt && !cli.decrypt {
        anyhow::bail!("Choose a mode: --encrypt or --decrypt. Use --help for more information.");
    }

    let input = cli
        .input
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("--input is required. Use --help for more information."))?;
    let key = cli
        .key
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("--key is required. Use --help for more information."))?;

    if key.is_empty() {
        anyhow::bail!("--key must not be empty");
    }

    let mut module = match cli.capacity {
        Some(capacity) => CipherModule::with_capacity(capacity),
        None => CipherModule::new(),
    };

    if cli.encrypt {
        println!("Encrypting {} input bytes\n", input.len());
        let ciphertext = host::encrypt_text(&mut module, input, key)?;
        println!("{}", "=".repeat(60));
        println!("Ciphertext (hex):\n{}", ciphertext);
        println!("{}", "=".repeat(60));
    } else {
        println!("Decrypting {} hex characters\n", input.trim().len());
        let plaintext = host::decrypt_hex(&mut module, input, key)?;
        println!("{}", "=".repeat(60));
        println!("Recovered text:\n{}", plaintext);
        println!("{}", "=".repeat(60));
    }

    println!(
        "Arena after release: {} live buffers, {} bytes in use",
        module.live_buffers(),
        module.bytes_in_use()
    );
    println!();
    Ok(())
}
