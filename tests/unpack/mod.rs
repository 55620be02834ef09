//! Email unpacking tests.

mod eml;
