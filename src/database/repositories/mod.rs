pub mod grill_counter;
pub mod like;
