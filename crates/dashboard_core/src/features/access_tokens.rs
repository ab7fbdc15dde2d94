//! Access tokens contribute a group of slices, one per token type.

use shared::domain::SliceKey;

use super::resources::ResourceReducer;
use crate::registry::Contribution;

pub fn contribution() -> Contribution {
    Contribution::Group(vec![
        ResourceReducer::entry(SliceKey::ClientAccessToken, "CLIENT_ACCESS_TOKEN"),
        ResourceReducer::entry(SliceKey::NetworkAccessToken, "NETWORK_ACCESS_TOKEN"),
    ])
}
