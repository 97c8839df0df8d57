//! Per-company enrichment and flattening into [`EnrichedRecord`]s.
//!
//! Each candidate costs up to five requests: profile, officers, filing
//! history, charges and PSC, in that order. A 404 on any of them means "none";
//! an error is logged and leaves the matching fields empty. Neither stops the
//! record from being produced.

use companies_house_api::types::{
    Address, ApiDate, Charge, CompanyProfile, Filing, ItemList, Officer,
    PersonWithSignificantControl,
};
use companies_house_api::{FilingHistoryQuery, Query};

use crate::classify::{BusinessType, Classifier};
use crate::client::PacedClient;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::record::{join_list, single_line, Candidate, EnrichedRecord};
use crate::sic;

const MAX_DIRECTOR_NAMES: usize = 5;
const MAX_PSC_NAMES: usize = 3;

/// Everything fetched for one company. Empty lists mean "none or unavailable".
#[derive(Debug, Default, Clone)]
pub struct CompanyData {
    pub profile: Option<CompanyProfile>,
    pub officers: Vec<Officer>,
    pub filings: Vec<Filing>,
    pub charges: Vec<Charge>,
    pub psc: Vec<PersonWithSignificantControl>,
}

/// Fetches the five per-company endpoints in order.
pub async fn fetch_company_data(
    client: &PacedClient,
    company_number: &str,
    max_filings: i64,
) -> CompanyData {
    let profile = match client.get_company_profile(company_number).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("{}: profile unavailable: {}", company_number, e);
            None
        }
    };

    let officers = items_or_empty(
        client.get_officers(company_number).await,
        company_number,
        "officers",
    );

    let filing_query = FilingHistoryQuery::default().with_items_per_page(max_filings);
    let filings = items_or_empty(
        client
            .get_filing_history(company_number, &filing_query)
            .await,
        company_number,
        "filing history",
    );

    let charges = items_or_empty(
        client.get_charges(company_number).await,
        company_number,
        "charges",
    );

    let psc = items_or_empty(
        client
            .get_persons_with_significant_control(company_number)
            .await,
        company_number,
        "PSC",
    );

    CompanyData {
        profile,
        officers,
        filings,
        charges,
        psc,
    }
}

fn items_or_empty<T>(
    result: Result<Option<ItemList<T>>, ScanError>,
    company_number: &str,
    what: &str,
) -> Vec<T> {
    match result {
        Ok(Some(list)) => list.items,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("{}: {} unavailable: {}", company_number, what, e);
            Vec::new()
        }
    }
}

fn render(date: Option<&ApiDate>) -> String {
    date.map(ApiDate::render).unwrap_or_default()
}

fn text(value: Option<&str>) -> String {
    value.map(single_line).unwrap_or_default()
}

fn first_non_empty(values: &[Option<&str>]) -> String {
    values
        .iter()
        .flatten()
        .map(|v| single_line(v))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Builds the flat record from a candidate and whatever was fetched for it.
/// Profile data takes precedence; the search hit fills any gaps.
pub fn flatten(candidate: &Candidate, data: &CompanyData, classifier: &Classifier) -> EnrichedRecord {
    let hit = &candidate.hit;
    let profile = data.profile.as_ref();
    let business_type = candidate.business_type;

    let address: Option<&Address> = profile
        .map(|p| &p.registered_office_address)
        .filter(|a| a.parts().next().is_some())
        .or(hit.address.as_ref());
    let registered_address = match address {
        Some(a) if a.parts().next().is_some() => a.joined(),
        _ => text(hit.address_snippet.as_deref()),
    };

    let sic_codes: &[String] = match profile {
        Some(p) if !p.sic_codes.is_empty() => p.sic_codes.as_slice(),
        _ => hit.sic_codes.as_slice(),
    };

    let accounts = profile.map(|p| &p.accounts);
    let last_accounts = accounts.and_then(|a| a.last_accounts.as_ref());
    let next_accounts_due = accounts.and_then(|a| {
        a.next_due
            .as_ref()
            .or(a.next_accounts.as_ref().and_then(|n| n.due_on.as_ref()))
    });
    let confirmation = profile.map(|p| &p.confirmation_statement);

    let directors: Vec<&Officer> = data
        .officers
        .iter()
        .filter(|o| o.is_active_director())
        .collect();
    let latest_filing = data.filings.first();

    EnrichedRecord {
        company_number: hit.company_number.trim().to_string(),
        company_name: first_non_empty(&[
            profile.and_then(|p| p.company_name.as_deref()),
            Some(hit.name.as_str()),
        ]),
        status: first_non_empty(&[
            profile.and_then(|p| p.company_status.as_deref()),
            hit.company_status.as_deref(),
        ]),
        company_type: first_non_empty(&[
            profile.and_then(|p| p.company_type.as_deref()),
            hit.company_type.as_deref(),
        ]),
        date_of_creation: match profile.and_then(|p| p.date_of_creation.as_ref()) {
            Some(date) => date.render(),
            None => text(hit.date_of_creation.as_deref()),
        },
        registered_address,
        postcode: text(address.and_then(|a| a.postal_code.as_deref())),
        locality: text(address.and_then(|a| a.locality.as_deref())),
        region: text(address.and_then(|a| a.region.as_deref())),
        country: text(address.and_then(|a| a.country.as_deref())),
        jurisdiction: text(profile.and_then(|p| p.jurisdiction.as_deref())),
        sic_codes: join_list(sic_codes),
        sic_descriptions: join_list(sic::labels(sic_codes)),
        business_type,
        query_term: candidate.query_term.clone(),
        categories: join_list(classifier.categories(&hit.name, business_type)),
        is_truck_commercial: classifier.is_truck_commercial(&hit.name, business_type),
        is_mobile: business_type == BusinessType::MobileService,

        last_accounts_date: render(last_accounts.and_then(|l| l.made_up_to.as_ref())),
        last_accounts_type: text(last_accounts.and_then(|l| l.accounts_type.as_deref())),
        next_accounts_due: render(next_accounts_due),
        accounting_reference_date: accounts
            .and_then(|a| a.accounting_reference_date.as_ref())
            .map(|d| d.day_month())
            .unwrap_or_default(),
        last_confirmation: render(confirmation.and_then(|c| c.last_made_up_to.as_ref())),
        next_confirmation_due: render(confirmation.and_then(|c| c.next_due.as_ref())),

        total_officers: data.officers.len(),
        active_directors: directors.len(),
        director_names: join_list(
            directors
                .iter()
                .take(MAX_DIRECTOR_NAMES)
                .map(|o| o.name.as_str()),
        ),

        total_filings: data.filings.len(),
        latest_filing_date: text(latest_filing.and_then(|f| f.date.as_deref())),
        latest_filing_type: text(latest_filing.and_then(|f| f.filing_type.as_deref())),
        latest_filing_description: text(latest_filing.and_then(|f| f.description.as_deref())),

        total_charges: data.charges.len(),
        outstanding_charges: data.charges.iter().filter(|c| c.is_outstanding()).count(),

        psc_count: data.psc.len(),
        psc_names: join_list(
            data.psc
                .iter()
                .map(PersonWithSignificantControl::display_name)
                .filter(|n| !n.is_empty())
                .take(MAX_PSC_NAMES),
        ),

        has_charges: profile.is_some_and(|p| p.has_charges),
        has_insolvency_history: profile.is_some_and(|p| p.has_insolvency_history),
        can_file: profile.is_some_and(|p| p.can_file),
    }
}

/// Enriches one candidate. With enrichment off, only search data is used.
pub async fn enrich_candidate(
    client: &PacedClient,
    candidate: &Candidate,
    config: &ScanConfig,
    classifier: &Classifier,
) -> EnrichedRecord {
    let data = if config.enrich {
        fetch_company_data(client, candidate.company_number(), config.max_filings).await
    } else {
        CompanyData::default()
    };
    flatten(candidate, &data, classifier)
}

/// Enriches candidates sequentially, calling `on_record` after each one.
pub async fn enrich_all<F>(
    client: &PacedClient,
    candidates: &[Candidate],
    config: &ScanConfig,
    classifier: &Classifier,
    mut on_record: F,
) -> Vec<EnrichedRecord>
where
    F: FnMut(&EnrichedRecord),
{
    let mut records = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let record = enrich_candidate(client, candidate, config, classifier).await;
        on_record(&record);
        records.push(record);
    }
    records
}
