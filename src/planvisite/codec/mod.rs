//! Text codecs shared by the repositories: delimiter-separated rows and
//! currency amounts.

pub mod currency;
pub mod delimited;

pub use currency::{format_amount, format_euro, parse_amount, parse_euro};
pub use delimited::{format_rows, parse_rows};
