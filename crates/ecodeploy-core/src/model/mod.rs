//! モデル定義
//!
//! ecodeployで使用されるデータモデルを定義します。
//! すべての値はロード時に検証され、以後は読み取り専用です。

mod application;
mod descriptor;
mod environment;
mod locator;

// Re-exports
pub use application::*;
pub use descriptor::*;
pub use environment::*;
pub use locator::*;
