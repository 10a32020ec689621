pub mod catalog;
pub mod codec;
pub mod error;
pub mod merge;
pub mod record_set;
pub mod software;
mod xml;

pub use catalog::{parse_catalog, parse_catalog_file};
pub use codec::{decode, encode, load_dat, save_dat};
pub use error::DatError;
pub use merge::{MergeError, MergeSummary, merge, merge_to_files};
pub use record_set::{
    RecordShape, read_record_set, read_record_set_file, write_record_set, write_record_set_file,
};
pub use software::{parse_software_list, parse_software_list_file};
