//! rc4_arena - RC4 stream cipher behind an arena-backed module boundary
//!
//! The host allocates buffers inside the module's linear memory, writes the
//! input and key bytes, asks the engine to process them, reads the result
//! back, and frees every buffer it touched.

mod cipher;
mod cli;
mod encoding;
mod engine;
mod error;
mod host;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
