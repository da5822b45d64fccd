pub mod bird_queue;
pub mod damage;
pub mod factories;
pub mod sling;
