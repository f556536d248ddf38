pub mod grill_entity;
