mod blog_data_port;
mod image_fetcher_port;

pub use blog_data_port::BlogDataPort;
pub use image_fetcher_port::ImageFetcherPort;
