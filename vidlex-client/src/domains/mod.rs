pub mod activation;
pub mod feed;
pub mod player;
pub mod snippets;
pub mod video;
