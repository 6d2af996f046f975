//! Small helpers shared by the tap.
//!
//! - [`time`] - Bookmark timestamp formatting and parsing
//! - [`chunk`] - Fixed-size slicing of id lists
//! - [`json`] - JSON file and schema loading
//!
//! # Examples
//!
//! ```
//! use tap_pendo::utils::chunk::chunk;
//!
//! let ids = [1, 2, 3, 4, 5];
//! let batches: Vec<&[i32]> = chunk(&ids, 2).unwrap().collect();
//! assert_eq!(batches, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
//! ```

pub mod chunk;
pub mod json;
pub mod time;
