pub mod event;

/// Redis に保持するアクセストークン。中身は推測不能な不透明文字列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
