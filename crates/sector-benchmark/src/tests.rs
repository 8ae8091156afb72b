use std::sync::Arc;

use analysis_core::{
    BenchmarkKey, BenchmarkStore, Category, ClassificationScheme, Horizon, SectorClassification, StatementRecord,
    StatementStore,
};
use approx::assert_relative_eq;
use fundamental_analysis::FundamentalAnalysisEngine;

use crate::comparison::{compare, RelativePosition};
use crate::config::BenchmarkConfig;
use crate::recalculation::{RecalculationJob, SectorBucket};
use crate::store::{InMemoryBenchmarkStore, InMemoryStatementStore};

/// Helper: a bank statement with net banking income and net income.
fn bank(company: &str, year: i32, nbi: f64, net_income: f64) -> StatementRecord {
    StatementRecord {
        net_banking_income: Some(nbi),
        net_income: Some(net_income),
        total_assets: Some(nbi * 10.0),
        customer_loans: Some(nbi * 6.0),
        customer_deposits: Some(nbi * 7.5),
        equity: Some(nbi),
        ..StatementRecord::new(
            company,
            year,
            SectorClassification::new("services-financiers").with_reclassified("banques"),
        )
    }
}

/// Helper: an industrial statement with turnover, net income and debt.
fn industrial(company: &str, year: i32, reclassified: &str, turnover: f64, net_income: f64) -> StatementRecord {
    StatementRecord {
        turnover: Some(turnover),
        net_income: Some(net_income),
        equity: Some(turnover / 2.0),
        total_debt: Some(turnover / 4.0),
        ..StatementRecord::new(
            company,
            year,
            SectorClassification::new("industriels").with_reclassified(reclassified),
        )
    }
}

fn market() -> InMemoryStatementStore {
    InMemoryStatementStore::with_statements([
        bank("BOAB", 2022, 80.0, 8.0),
        bank("BOAB", 2023, 100.0, 10.0),
        bank("SGBC", 2022, 160.0, 16.0),
        bank("SGBC", 2023, 200.0, 40.0),
        bank("ETIT", 2022, 240.0, 24.0),
        bank("ETIT", 2023, 300.0, 90.0),
        industrial("SIVC", 2023, "btp", 1_000.0, 50.0),
        industrial("FTSC", 2023, "btp", 2_000.0, 200.0),
        industrial("SEMC", 2023, "agro", 500.0, 75.0),
        StatementRecord {
            turnover: Some(800.0),
            ..StatementRecord::new(
                "MINE",
                2023,
                SectorClassification::new("mines").with_reclassified("btp"),
            )
        },
    ])
}

fn buckets() -> Vec<SectorBucket> {
    vec![
        SectorBucket::official("services-financiers"),
        SectorBucket::official("industriels"),
        SectorBucket::reclassified("banques"),
        SectorBucket::reclassified("btp"),
        SectorBucket::official("mines"),
    ]
}

fn new_job(statements: Arc<InMemoryStatementStore>, benchmarks: Arc<InMemoryBenchmarkStore>) -> RecalculationJob {
    RecalculationJob::new(
        statements,
        benchmarks,
        FundamentalAnalysisEngine::default(),
        BenchmarkConfig::default(),
    )
}

#[tokio::test]
async fn test_batch_writes_every_sufficient_bucket() {
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(Arc::new(market()), benchmarks.clone());

    let report = job.recalculate(2023, &buckets()).await;

    // three buckets with three companies, three horizons each
    assert_eq!(report.written.len(), 9);
    assert_eq!(benchmarks.len(), 9);
    // btp keeps two computable companies, mines none
    assert_eq!(report.insufficient.len(), 6);
    assert!(report.bucket_failures.is_empty());
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_unknown_sector_is_counted_and_batch_continues() {
    let job = new_job(Arc::new(market()), Arc::new(InMemoryBenchmarkStore::new()));

    let report = job.recalculate(2023, &buckets()).await;

    // MINE appears in reclassified btp and official mines
    assert_eq!(report.company_failures.len(), 2);
    assert!(report.company_failures.iter().all(|f| f.company_id == "MINE" && f.year == 2023));
    assert!(report
        .company_failures
        .iter()
        .all(|f| f.error == analysis_core::AnalysisError::UnknownSector("mines".to_string())));
    assert!(report.has_failures());
}

#[tokio::test]
async fn test_bank_benchmark_statistics() {
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(Arc::new(market()), benchmarks.clone());
    job.recalculate(2023, &buckets()).await;

    let key = BenchmarkKey::new(ClassificationScheme::Official, "services-financiers", 2023, Horizon::ShortTerm);
    let stored = benchmarks.get(&key).await.unwrap().unwrap();
    let benchmark = &stored.benchmark;
    assert_eq!(benchmark.contributors, 3);

    // net margins 10%, 20%, 30%
    let margin = benchmark.stats(Category::Profitability, "net_margin").unwrap();
    assert_relative_eq!(margin.mean, 20.0, epsilon = 1e-9);
    assert_relative_eq!(margin.std_dev.unwrap(), 10.0, epsilon = 1e-9);

    // every bank grew revenue by 25% on its 2022 statement
    let growth = benchmark
        .stats(Category::Growth, "net_banking_income_growth")
        .unwrap();
    assert_relative_eq!(growth.mean, 25.0, epsilon = 1e-9);
    assert_relative_eq!(growth.std_dev.unwrap(), 0.0, epsilon = 1e-9);
    assert!(benchmark.stats(Category::Growth, "turnover_growth").is_none());

    // financial solidity set only
    assert!(benchmark.stats(Category::Solidity, "loan_to_deposit").is_some());
    assert!(benchmark.stats(Category::Solidity, "gearing").is_none());
}

#[tokio::test]
async fn test_schemes_are_independent_buckets() {
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(Arc::new(market()), benchmarks.clone());
    job.recalculate(2023, &buckets()).await;

    let official = BenchmarkKey::new(ClassificationScheme::Official, "industriels", 2023, Horizon::LongTerm);
    let industrials = benchmarks.get(&official).await.unwrap().unwrap().benchmark;
    assert_eq!(industrials.contributors, 3);
    // no 2022 statements: growth is absent, not zero
    assert!(industrials.indicators.get(&Category::Growth).is_none());
    // gearing is 50% for every industrial
    let gearing = industrials.stats(Category::Solidity, "gearing").unwrap();
    assert_relative_eq!(gearing.mean, 50.0, epsilon = 1e-9);

    let btp = BenchmarkKey::new(ClassificationScheme::Reclassified, "btp", 2023, Horizon::LongTerm);
    assert!(benchmarks.get(&btp).await.unwrap().is_none());

    let banks = BenchmarkKey::new(ClassificationScheme::Reclassified, "banques", 2023, Horizon::MediumTerm);
    assert!(benchmarks.get(&banks).await.unwrap().is_some());
}

#[tokio::test]
async fn test_horizons_share_statistics() {
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(Arc::new(market()), benchmarks.clone());
    job.recalculate(2023, &[SectorBucket::official("industriels")]).await;

    let stored: Vec<_> = Horizon::all()
        .iter()
        .map(|h| BenchmarkKey::new(ClassificationScheme::Official, "industriels", 2023, *h))
        .collect();
    let short = benchmarks.get(&stored[0]).await.unwrap().unwrap().benchmark;
    let long = benchmarks.get(&stored[2]).await.unwrap().unwrap().benchmark;
    assert_eq!(short.indicators, long.indicators);
    assert_ne!(short.key, long.key);
}

#[tokio::test]
async fn test_rerun_replaces_instead_of_accumulating() {
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(Arc::new(market()), benchmarks.clone());
    let key = BenchmarkKey::new(ClassificationScheme::Reclassified, "banques", 2023, Horizon::ShortTerm);

    job.recalculate(2023, &buckets()).await;
    let first = benchmarks.get(&key).await.unwrap().unwrap();

    job.recalculate(2023, &buckets()).await;
    let second = benchmarks.get(&key).await.unwrap().unwrap();

    assert_eq!(benchmarks.len(), 9);
    assert_eq!(first.benchmark, second.benchmark);
    assert!(second.revision > first.revision);
    assert!(second.written_at >= first.written_at);
}

#[tokio::test]
async fn test_restated_statement_changes_benchmark_on_rerun() {
    let statements = Arc::new(market());
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(statements.clone(), benchmarks.clone());
    let key = BenchmarkKey::new(ClassificationScheme::Official, "services-financiers", 2023, Horizon::ShortTerm);

    job.recalculate(2023, &[SectorBucket::official("services-financiers")]).await;
    statements.insert(bank("ETIT", 2023, 300.0, 60.0));
    job.recalculate(2023, &[SectorBucket::official("services-financiers")]).await;

    let margin = benchmarks
        .get(&key)
        .await
        .unwrap()
        .unwrap()
        .benchmark
        .stats(Category::Profitability, "net_margin")
        .cloned()
        .unwrap();
    // 10%, 20%, 20%
    assert_relative_eq!(margin.mean, 50.0 / 3.0, epsilon = 1e-9);
    assert_eq!(margin.sample_size, 3);
}

#[tokio::test]
async fn test_company_compared_to_its_sector() {
    let statements = Arc::new(market());
    let benchmarks = Arc::new(InMemoryBenchmarkStore::new());
    let job = new_job(statements.clone(), benchmarks.clone());
    job.recalculate(2023, &[SectorBucket::official("services-financiers")]).await;

    let key = BenchmarkKey::new(ClassificationScheme::Official, "services-financiers", 2023, Horizon::MediumTerm);
    let benchmark = benchmarks.get(&key).await.unwrap().unwrap().benchmark;

    let engine = FundamentalAnalysisEngine::default();
    let current = statements.fetch_statement("ETIT", 2023).await.unwrap();
    let previous = statements.fetch_statement("ETIT", 2022).await.unwrap();
    let result = engine.calculate_indicators(&current, Some(&previous)).unwrap();

    let comparisons = compare(&result, &benchmark);
    let margin = comparisons
        .iter()
        .find(|c| c.category == Category::Profitability && c.indicator == "net_margin")
        .unwrap();
    assert_relative_eq!(margin.z_score.unwrap(), 1.0, epsilon = 1e-9);
    assert_eq!(margin.position, RelativePosition::Above);

    let growth = comparisons
        .iter()
        .find(|c| c.indicator == "net_banking_income_growth")
        .unwrap();
    assert_eq!(growth.position, RelativePosition::InLine);
}
