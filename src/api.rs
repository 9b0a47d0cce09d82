use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::state::{
    ChainLink, EntityAbility, EntityDetail, EntityStat, EvolutionChain, LocalizedText,
    NamedResource, PokedexDetail, PokedexEntry, RegionDetail, SpeciesDetail, SpriteRefs,
    TypeMembership,
};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_ENTITY_LIMIT: u32 = 1500;
const TYPE_LIST_LIMIT: u32 = 25;
const REGION_LIST_LIMIT: u32 = 12;
const EXCLUDED_TYPES: [&str; 2] = ["unknown", "shadow"];

/// Failures of the list fetchers. A screen cannot render without these lists, so
/// they surface to the user with a fixed label instead of turning into an absence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Could not fetch Pokémon list.")]
    EntityList,
    #[error("Could not fetch type list.")]
    TypeList,
    #[error("Could not fetch region list.")]
    RegionList,
}

/// Raw GET returning parsed JSON. The production transport is [`HttpTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, String>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let response = response.error_for_status().map_err(|err| err.to_string())?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| err.to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ResourceRef {
    name: String,
    url: String,
}

impl From<ResourceRef> for NamedResource {
    fn from(resource: ResourceRef) -> Self {
        NamedResource {
            name: resource.name,
            url: resource.url,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct UrlRef {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<ResourceRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    sprites: serde_json::Value,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    species: Option<ResourceRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: ResourceRef,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: ResourceRef,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: ResourceRef,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    name: String,
    color: Option<ResourceRef>,
    shape: Option<ResourceRef>,
    habitat: Option<ResourceRef>,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    genera: Vec<GenusEntry>,
    capture_rate: Option<u32>,
    base_happiness: Option<u32>,
    growth_rate: Option<ResourceRef>,
    evolution_chain: Option<UrlRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: ResourceRef,
    version: Option<ResourceRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct GenusEntry {
    genus: String,
    language: ResourceRef,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    id: u32,
    chain: ChainLinkResponse,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLinkResponse {
    species: ResourceRef,
    #[serde(default)]
    evolves_to: Vec<ChainLinkResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    name: String,
    #[serde(default)]
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: ResourceRef,
}

#[derive(Clone, Debug, Deserialize)]
struct RegionResponse {
    name: String,
    #[serde(default)]
    pokedexes: Vec<ResourceRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexResponse {
    name: String,
    #[serde(default)]
    pokemon_entries: Vec<PokedexEntryResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexEntryResponse {
    entry_number: u32,
    pokemon_species: ResourceRef,
}

/// Typed PokeAPI gateway. Single requests, no retry, no caching.
#[derive(Clone)]
pub struct PokeApi {
    base: String,
    transport: Arc<dyn Transport>,
}

impl PokeApi {
    pub fn new(base: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn http(base: impl Into<String>) -> Self {
        Self::new(base, Arc::new(HttpTransport::new()))
    }

    /// URL of the detail record for `name`; used to materialize favorites.
    pub fn entity_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base, name)
    }

    pub async fn fetch_all_entities(&self, limit: u32) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base);
        match self.get::<ListResponse>(&url).await {
            Ok(response) => {
                tracing::info!(count = response.results.len(), "fetched entity list");
                Ok(response.results.into_iter().map(Into::into).collect())
            }
            Err(error) => {
                tracing::error!(%url, %error, "entity list fetch failed");
                Err(ApiError::EntityList)
            }
        }
    }

    pub async fn fetch_entity_detail(&self, name: &str) -> Option<EntityDetail> {
        if name.is_empty() {
            tracing::warn!("fetch_entity_detail called with empty name");
            return None;
        }
        let url = format!("{}/pokemon/{}", self.base, name.to_lowercase());
        self.fetch_entity_detail_by_url(&url).await
    }

    pub async fn fetch_entity_detail_by_url(&self, url: &str) -> Option<EntityDetail> {
        if url.is_empty() {
            tracing::warn!("fetch_entity_detail_by_url called with empty url");
            return None;
        }
        let response: PokemonResponse = self.get_optional(url).await?;
        Some(entity_from_response(response))
    }

    pub async fn fetch_species(&self, url: &str) -> Option<SpeciesDetail> {
        if url.is_empty() {
            tracing::warn!("fetch_species called with empty url");
            return None;
        }
        let response: SpeciesResponse = self.get_optional(url).await?;
        Some(species_from_response(response))
    }

    pub async fn fetch_evolution_chain(&self, url: &str) -> Option<EvolutionChain> {
        if url.is_empty() {
            tracing::warn!("fetch_evolution_chain called with empty url");
            return None;
        }
        let response: EvolutionChainResponse = self.get_optional(url).await?;
        Some(EvolutionChain {
            id: response.id,
            chain: chain_from_response(response.chain),
        })
    }

    pub async fn fetch_type_detail(&self, name: &str) -> Option<TypeMembership> {
        if name.is_empty() {
            tracing::warn!("fetch_type_detail called with empty name");
            return None;
        }
        let url = format!("{}/type/{}", self.base, name.to_lowercase());
        let response: TypeDetailResponse = self.get_optional(&url).await?;
        Some(TypeMembership {
            name: response.name,
            members: response
                .pokemon
                .into_iter()
                .map(|entry| entry.pokemon.into())
                .collect(),
        })
    }

    pub async fn fetch_all_types(&self) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/type?limit={TYPE_LIST_LIMIT}", self.base);
        match self.get::<ListResponse>(&url).await {
            Ok(response) => {
                let types: Vec<NamedResource> = response
                    .results
                    .into_iter()
                    .filter(|entry| !EXCLUDED_TYPES.contains(&entry.name.as_str()))
                    .map(Into::into)
                    .collect();
                tracing::info!(count = types.len(), "fetched standard types");
                Ok(types)
            }
            Err(error) => {
                tracing::error!(%url, %error, "type list fetch failed");
                Err(ApiError::TypeList)
            }
        }
    }

    pub async fn fetch_all_regions(&self) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/region?limit={REGION_LIST_LIMIT}", self.base);
        match self.get::<ListResponse>(&url).await {
            Ok(response) => {
                tracing::info!(count = response.results.len(), "fetched regions");
                Ok(response.results.into_iter().map(Into::into).collect())
            }
            Err(error) => {
                tracing::error!(%url, %error, "region list fetch failed");
                Err(ApiError::RegionList)
            }
        }
    }

    pub async fn fetch_region(&self, name: &str) -> Option<RegionDetail> {
        if name.is_empty() {
            tracing::warn!("fetch_region called with empty name");
            return None;
        }
        let url = format!("{}/region/{}", self.base, name.to_lowercase());
        let response: RegionResponse = self.get_optional(&url).await?;
        Some(RegionDetail {
            name: response.name,
            pokedexes: response.pokedexes.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn fetch_pokedex(&self, url: &str) -> Option<PokedexDetail> {
        if url.is_empty() {
            tracing::warn!("fetch_pokedex called with empty url");
            return None;
        }
        let response: PokedexResponse = self.get_optional(url).await?;
        Some(PokedexDetail {
            name: response.name,
            entries: response
                .pokemon_entries
                .into_iter()
                .map(|entry| PokedexEntry {
                    entry_number: entry.entry_number,
                    species: entry.pokemon_species.into(),
                })
                .collect(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        tracing::debug!(%url, "GET");
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value).map_err(|err| err.to_string())
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.get(url).await {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%url, %error, "request failed");
                None
            }
        }
    }
}

fn entity_from_response(response: PokemonResponse) -> EntityDetail {
    let sprites = SpriteRefs {
        front_default: pointer_string(&response.sprites, "/front_default"),
        official_artwork: pointer_string(
            &response.sprites,
            "/other/official-artwork/front_default",
        ),
        home: pointer_string(&response.sprites, "/other/home/front_default"),
    };
    EntityDetail {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        sprites,
        stats: response
            .stats
            .into_iter()
            .map(|slot| EntityStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| EntityAbility {
                name: slot.ability.name,
                hidden: slot.is_hidden,
            })
            .collect(),
        species: response.species.map(Into::into),
    }
}

fn species_from_response(response: SpeciesResponse) -> SpeciesDetail {
    SpeciesDetail {
        name: response.name,
        color: response.color.map(|tag| tag.name),
        shape: response.shape.map(|tag| tag.name),
        habitat: response.habitat.map(|tag| tag.name),
        flavor_text_entries: response
            .flavor_text_entries
            .into_iter()
            .map(|entry| LocalizedText {
                text: entry.flavor_text,
                language: entry.language.name,
                version: entry.version.map(|version| version.name),
            })
            .collect(),
        genera: response
            .genera
            .into_iter()
            .map(|entry| LocalizedText {
                text: entry.genus,
                language: entry.language.name,
                version: None,
            })
            .collect(),
        capture_rate: response.capture_rate,
        base_happiness: response.base_happiness,
        growth_rate: response.growth_rate.map(|tag| tag.name),
        evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
    }
}

fn chain_from_response(link: ChainLinkResponse) -> ChainLink {
    ChainLink {
        species: link.species.into(),
        evolves_to: link
            .evolves_to
            .into_iter()
            .map(chain_from_response)
            .collect(),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
