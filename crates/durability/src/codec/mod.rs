//! Record codec
//!
//! One event is stored as one tab-separated, newline-terminated text line:
//!
//! ```text
//! <yymmdd-HHMMSS.ffffff>\t<var_type>\t<var_name>\t<value>\t<json metadata>\n
//! ```
//!
//! Decoding is strict about the shape of a record; any failure is reported as
//! a [`CodecError`] and readers skip the record instead of aborting the scan.
//!
//! # Usage
//!
//! ```ignore
//! use evtstore_durability::codec::{encode_record, decode_record};
//!
//! let line = encode_record(&event)?;
//! let decoded = decode_record(&line)?;
//! assert_eq!(decoded, event);
//! ```

mod error;
mod record;

pub use error::CodecError;
pub use record::{
    decode_record, encode_record, split_record, RawRecord, FIELD_COUNT, FIELD_SEP, RECORD_SEP,
    RECORD_TS_FMT, RECORD_TS_WIDTH,
};
