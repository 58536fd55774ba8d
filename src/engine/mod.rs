mod import_engine;
#[cfg(test)]
mod tests;

pub use import_engine::ImportEngine;
