pub mod pvp_record;
pub mod student;
