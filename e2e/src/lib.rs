//! End-to-end tests of the SDK against a mock Scribe API.

#[cfg(test)]
mod tests;
