pub mod normalize;
pub mod scratch;
pub mod source;

pub use normalize::{ffmpeg_args, normalize_to_wav};
pub use scratch::ScratchFile;
pub use source::{storage_path_from_url, ObjectStore, StorageClient};
