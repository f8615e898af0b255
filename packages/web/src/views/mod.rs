mod profile;
pub use profile::Profile;

mod todos;
pub use todos::Todos;
