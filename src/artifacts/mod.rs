pub mod commit;
pub mod merge;
pub mod object_id;
pub mod record;
pub mod status;
pub mod tree;
