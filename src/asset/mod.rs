pub mod normalize;
pub mod report;

pub use normalize::{coerce_record, normalize_search_results, AssetRow, SearchData};
pub use report::{details_file_name, write_csv_report, write_details_file};
