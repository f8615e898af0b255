mod profile;
pub use profile::ProfileView;

mod todos;
pub use todos::TodoListView;
