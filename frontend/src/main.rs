//! Entry point for the WASM application

pub fn main() {
    archive2pdf::run();
}
