#![cfg(test)]

mod session;
mod util;
