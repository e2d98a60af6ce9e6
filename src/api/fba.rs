/// FBA request builders
///
/// Thin parameter marshaling over the retrying executor: each operation
/// maps to one SP-API path plus query parameters and returns the decoded
/// response body. The marketplace defaults to the configured one when the
/// caller passes none.
use anyhow::Result;
use reqwest::Method;
use serde_json::Value;

use crate::resilience::executor::RequestExecutor;

/// Program to check inbound eligibility against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramType {
    Inbound,
    Commingling,
}

impl ProgramType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramType::Inbound => "INBOUND",
            ProgramType::Commingling => "COMMINGLING",
        }
    }
}

/// Aggregation level for inventory summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GranularityType {
    Marketplace,
    Asin,
    Seller,
}

impl GranularityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GranularityType::Marketplace => "Marketplace",
            GranularityType::Asin => "ASIN",
            GranularityType::Seller => "Seller",
        }
    }
}

/// Selector for the shipment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentQueryType {
    Shipment,
    DateRange,
    NextToken,
}

impl ShipmentQueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentQueryType::Shipment => "SHIPMENT",
            ShipmentQueryType::DateRange => "DATE_RANGE",
            ShipmentQueryType::NextToken => "NEXT_TOKEN",
        }
    }
}

/// Eligibility status of an item for the given inbound program.
pub async fn get_inbound_eligibility(
    executor: &RequestExecutor,
    asin: &str,
    program_type: ProgramType,
    marketplace_id: Option<&str>,
) -> Result<Value> {
    let marketplace = marketplace_id.unwrap_or(&executor.config().marketplace_id);
    let query = vec![
        ("asin".to_string(), asin.to_string()),
        ("program".to_string(), program_type.as_str().to_string()),
        ("marketplaceIds".to_string(), marketplace.to_string()),
    ];

    let data = executor
        .execute(
            Method::GET,
            "/fba/inbound/v1/eligibility/inboundEligibility",
            None,
            &query,
        )
        .await?;
    Ok(data)
}

/// Inventory summaries at the requested aggregation level.
pub async fn get_inventory_summaries(
    executor: &RequestExecutor,
    details: bool,
    granularity_type: GranularityType,
    granularity_id: Option<&str>,
    marketplace_id: Option<&str>,
) -> Result<Value> {
    let marketplace = marketplace_id.unwrap_or(&executor.config().marketplace_id);
    let mut query = vec![
        (
            "details".to_string(),
            if details { "true" } else { "false" }.to_string(),
        ),
        (
            "granularityType".to_string(),
            granularity_type.as_str().to_string(),
        ),
        ("marketplaceIds".to_string(), marketplace.to_string()),
    ];
    if let Some(granularity_id) = granularity_id {
        query.push(("granularityId".to_string(), granularity_id.to_string()));
    }

    let data = executor
        .execute(Method::GET, "/fba/inventory/v1/summaries", None, &query)
        .await?;
    Ok(data)
}

/// Inbound shipments matching the given criteria.
pub async fn get_shipments(
    executor: &RequestExecutor,
    query_type: ShipmentQueryType,
    shipment_status_list: &[String],
    next_token: Option<&str>,
    marketplace_id: Option<&str>,
) -> Result<Value> {
    let marketplace = marketplace_id.unwrap_or(&executor.config().marketplace_id);
    let mut query = vec![
        ("QueryType".to_string(), query_type.as_str().to_string()),
        ("MarketplaceId".to_string(), marketplace.to_string()),
    ];
    if !shipment_status_list.is_empty() {
        query.push((
            "ShipmentStatusList".to_string(),
            shipment_status_list.join(","),
        ));
    }
    if let Some(next_token) = next_token {
        query.push(("NextToken".to_string(), next_token.to_string()));
    }

    let data = executor
        .execute(Method::GET, "/fba/inbound/v0/shipments", None, &query)
        .await?;
    Ok(data)
}
