//! WebSocket delivery tests
