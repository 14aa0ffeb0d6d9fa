//! Operations supported by the upstream ER:LC API.

use reqwest::Method;

/// A call the proxy client can make against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    GetServerInfo,
    ListPlayers,
    ListStaff,
    ListQueue,
    ListJoinLogs,
    ListKillLogs,
    ListCommandLogs,
    ListModCalls,
    ListBans,
    ListVehicles,
    ExecuteCommand,
    TestConnection,
}

impl UpstreamOperation {
    /// Read operations reachable through `GET /api/upstream/{segment}/{server_id}`.
    pub const LIVE_READS: [UpstreamOperation; 10] = [
        Self::GetServerInfo,
        Self::ListPlayers,
        Self::ListStaff,
        Self::ListQueue,
        Self::ListJoinLogs,
        Self::ListKillLogs,
        Self::ListCommandLogs,
        Self::ListModCalls,
        Self::ListBans,
        Self::ListVehicles,
    ];

    /// Parses the route segment of a live read, e.g. `server-info` or `players`.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::LIVE_READS
            .into_iter()
            .find(|operation| operation.segment() == Some(segment))
    }

    /// Route segment of a live read; `None` for operations with dedicated routes.
    pub fn segment(self) -> Option<&'static str> {
        match self {
            Self::GetServerInfo => Some("server-info"),
            Self::ListPlayers => Some("players"),
            Self::ListStaff => Some("staff"),
            Self::ListQueue => Some("queue"),
            Self::ListJoinLogs => Some("joinlogs"),
            Self::ListKillLogs => Some("killlogs"),
            Self::ListCommandLogs => Some("commandlogs"),
            Self::ListModCalls => Some("modcalls"),
            Self::ListBans => Some("bans"),
            Self::ListVehicles => Some("vehicles"),
            Self::ExecuteCommand | Self::TestConnection => None,
        }
    }

    /// Field of the success envelope that carries this operation's upstream data.
    ///
    /// The three log reads share `logs`.
    pub fn response_key(self) -> &'static str {
        match self {
            Self::GetServerInfo | Self::TestConnection => "serverInfo",
            Self::ListPlayers => "players",
            Self::ListStaff => "staff",
            Self::ListQueue => "queue",
            Self::ListJoinLogs | Self::ListKillLogs | Self::ListCommandLogs => "logs",
            Self::ListModCalls => "modcalls",
            Self::ListBans => "bans",
            Self::ListVehicles => "vehicles",
            Self::ExecuteCommand => "result",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::ExecuteCommand => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path relative to the upstream base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::GetServerInfo | Self::TestConnection => "/server",
            Self::ListPlayers => "/server/players",
            Self::ListStaff => "/server/staff",
            Self::ListQueue => "/server/queue",
            Self::ListJoinLogs => "/server/joinlogs",
            Self::ListKillLogs => "/server/killlogs",
            Self::ListCommandLogs => "/server/commandlogs",
            Self::ListModCalls => "/server/modcalls",
            Self::ListBans => "/server/bans",
            Self::ListVehicles => "/server/vehicles",
            Self::ExecuteCommand => "/server/command",
        }
    }
}
