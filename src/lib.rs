//! clikit - Interactive building blocks for terminal programs
//! Raw key decoding, cursor queries, a list selector, line input and a console

pub mod color;
pub mod console;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod input;
pub mod key;
pub mod layout;
pub mod output;
pub mod render;
pub mod selector;
pub mod term;
pub mod test_utils;
pub mod timer;

pub use error::{ClikitError, Result};
pub use key::KeyEvent;
pub use selector::{Outcome, Selection, Selector, SelectorOptions};
pub use term::{Capabilities, TerminalBackend};
