/// Image decoding module
///
/// This module handles:
/// - Decoding images downloaded from the gallery service
/// - Downscaling them into grid thumbnails

pub mod thumbnail;
