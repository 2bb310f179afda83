pub mod mock_chat_server;
