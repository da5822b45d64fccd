pub mod sling_drag;
