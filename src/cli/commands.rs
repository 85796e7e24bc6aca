use clap::Subcommand;

use super::check::CheckArgs;
use super::fetch::FetchArgs;
use super::fill::FillArgs;
use super::mappings::MappingsArgs;
use super::watch::WatchArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Fetch the latest pending grievance from the backend
    Fetch(FetchArgs),

    /// Fill a grievance into a saved page and report the outcome
    Fill(FillArgs),

    /// Check whether a URL is an eligible complaint page
    Check(CheckArgs),

    /// Poll for pending grievances and announce fill invitations
    Watch(WatchArgs),

    /// Show the effective field locator tables
    Mappings(MappingsArgs),
}
