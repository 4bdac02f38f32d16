pub mod if_match;
pub mod room_code;
pub mod validated_json;

pub use if_match::IfMatchVersion;
pub use room_code::RoomCodePath;
pub use validated_json::ValidatedJson;
