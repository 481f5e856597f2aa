/*!
This crate contains the plain text table used to print evaluation reports to the terminal.
*/

mod table;

pub use self::table::{Align, Table};
