//! Typed entities managed by the console

pub mod macros;
pub mod notice;
pub mod room;
pub mod student;

pub use notice::Notice;
pub use room::Room;
pub use student::Student;
