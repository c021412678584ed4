use strum::{AsRefStr, Display, EnumIter};

/// Lifecycle of the single streaming connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, AsRefStr)]
pub enum ConnectionState {
    #[default]
    #[strum(serialize = "closed")]
    Closed,
    #[strum(serialize = "connecting")]
    Connecting,
    #[strum(serialize = "open")]
    Open,
}

/// Discrete events that drive [`ConnectionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LifecycleEvent {
    ConnectRequested,
    Opened,
    Closed,
    Failed,
}

impl ConnectionState {
    /// Next state after `event`. Unexpected events leave the state as is.
    pub fn on(self, event: LifecycleEvent) -> Self {
        use ConnectionState as S;
        use LifecycleEvent as E;
        match (self, event) {
            (S::Closed, E::ConnectRequested) => S::Connecting,
            (S::Connecting, E::Opened) => S::Open,
            (_, E::Closed) | (_, E::Failed) => S::Closed,
            (state, _) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self == ConnectionState::Open
    }

    pub fn is_active(self) -> bool {
        self != ConnectionState::Closed
    }
}
