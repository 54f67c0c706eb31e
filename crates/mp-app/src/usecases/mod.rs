pub mod role_holder_launch;
