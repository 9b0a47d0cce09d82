//! Filter composition: resolves the type and region selectors into membership
//! sets through the gateway and intersects them with the search term.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::api::PokeApi;
use crate::state::{NamedResource, RegionDetail};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub search: String,
    pub type_filter: Option<String>,
    pub region_filter: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultOrder {
    /// Keep the order of the base collection.
    Preserve,
    ByName,
}

/// Pokedex grouping used for a region: the one named after the region, else the first.
pub fn select_pokedex<'a>(region: &'a RegionDetail, region_name: &str) -> Option<&'a NamedResource> {
    let wanted = region_name.to_lowercase();
    region
        .pokedexes
        .iter()
        .find(|dex| dex.name.to_lowercase() == wanted)
        .or_else(|| region.pokedexes.first())
}

pub async fn resolve_region_members(api: &PokeApi, region_name: &str) -> HashSet<String> {
    let Some(region) = api.fetch_region(region_name).await else {
        return HashSet::new();
    };
    let Some(dex) = select_pokedex(&region, region_name) else {
        tracing::warn!(region = region_name, "region lists no pokedex");
        return HashSet::new();
    };
    let Some(pokedex) = api.fetch_pokedex(&dex.url).await else {
        return HashSet::new();
    };
    pokedex
        .entries
        .into_iter()
        .map(|entry| entry.species.name)
        .collect()
}

pub async fn resolve_type_members(api: &PokeApi, type_name: &str) -> HashSet<String> {
    api.fetch_type_detail(type_name)
        .await
        .map(|membership| {
            membership
                .members
                .into_iter()
                .map(|member| member.name)
                .collect()
        })
        .unwrap_or_default()
}

/// Pure part of a filter pass. `None` sets place no constraint.
pub fn apply_filters(
    base: &[NamedResource],
    search: &str,
    type_members: Option<&HashSet<String>>,
    region_members: Option<&HashSet<String>>,
    order: ResultOrder,
) -> Vec<NamedResource> {
    let needle = search.to_lowercase();
    let mut results: Vec<NamedResource> = base
        .iter()
        .filter(|entry| type_members.map_or(true, |set| set.contains(&entry.name)))
        .filter(|entry| region_members.map_or(true, |set| set.contains(&entry.name)))
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    if order == ResultOrder::ByName {
        results.sort_by(|a, b| a.name.cmp(&b.name));
    }
    results
}

/// Full filter pass over `base`. Failed lookups resolve to empty sets, so a
/// selector whose data cannot be fetched filters everything out.
pub async fn compose(
    api: &PokeApi,
    base: &[NamedResource],
    query: &FilterQuery,
    order: ResultOrder,
) -> Vec<NamedResource> {
    let (region_members, type_members) = tokio::join!(
        async {
            match query.region_filter.as_deref() {
                Some(region) => Some(resolve_region_members(api, region).await),
                None => None,
            }
        },
        async {
            match query.type_filter.as_deref() {
                Some(type_name) => Some(resolve_type_members(api, type_name).await),
                None => None,
            }
        },
    );
    let results = apply_filters(
        base,
        &query.search,
        type_members.as_ref(),
        region_members.as_ref(),
        order,
    );
    tracing::debug!(
        base = base.len(),
        results = results.len(),
        search = %query.search,
        type_filter = ?query.type_filter,
        region_filter = ?query.region_filter,
        "filter pass"
    );
    results
}

/// Materializes favorite identifiers as resources with URLs derived from the API base.
pub fn favorites_as_resources<'a>(
    api: &PokeApi,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<NamedResource> {
    names
        .into_iter()
        .map(|name| NamedResource::new(name, api.entity_url(name)))
        .collect()
}
