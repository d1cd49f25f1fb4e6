pub mod pvp_record_repo;
pub mod student_repo;

pub use pvp_record_repo::PvpRecordRepo;
pub use student_repo::StudentRepo;
