pub mod quadriga;
