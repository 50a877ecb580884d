//! URL Generation
//!
//! Direct object URLs use https on the endpoint host. Website URLs use plain
//! http on the website suffix, which is how the provider serves them.

use serde::Serialize;

use crate::domain::value_objects::{clean_key, BucketName, RegionConfig};

/// Public URLs for one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUrls {
    pub file: String,
    pub direct: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

pub fn bucket_base_url(bucket: &BucketName, region: &RegionConfig) -> String {
    format!("https://{}.{}", bucket, region.endpoint_host())
}

pub fn direct_url(bucket: &BucketName, key: &str, region: &RegionConfig) -> String {
    format!("{}/{}", bucket_base_url(bucket, region), clean_key(key))
}

pub fn website_url(bucket: &BucketName, key: &str, region: &RegionConfig) -> String {
    let base = format!("http://{}.{}", bucket, region.website_suffix());
    let key = clean_key(key);
    if key.is_empty() {
        base
    } else {
        format!("{}/{}", base, key)
    }
}

pub fn file_urls<I, S>(
    bucket: &BucketName,
    files: I,
    region: &RegionConfig,
    include_website: bool,
) -> Vec<FileUrls>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    files
        .into_iter()
        .map(|file| {
            let file = file.as_ref();
            FileUrls {
                file: file.to_string(),
                direct: direct_url(bucket, file, region),
                website: include_website.then(|| website_url(bucket, file, region)),
            }
        })
        .collect()
}
