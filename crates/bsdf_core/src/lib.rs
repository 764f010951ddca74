//! Encoder and decoder for the Binary Structured Data Format (BSDF).
//!
//! BSDF is a self-describing binary format for trees of null, booleans,
//! integers, floats, text, lists, string-keyed maps and byte blobs. Host types
//! outside that set travel through named extensions.
//!
//! ```
//! use bsdf::codec::{Value, decode, encode};
//!
//! let value = Value::from(vec![Value::from(42), Value::from("hello")]);
//! let bytes = encode(&value, None).expect("encodes");
//! assert_eq!(&bytes[..4], b"BSDF");
//! assert_eq!(decode(&bytes, None).expect("decodes"), value);
//! ```

/// Wire codec, value model, extension registry, and serializer entry points.
pub mod codec;
