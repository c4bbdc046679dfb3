
pub use mock_engine::*;
pub use mock_server::*;
pub use mock_view::*;
pub use session_helpers::*;
