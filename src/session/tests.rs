use super::{AnalysisStatus, AnalyzerSession};
use crate::analysis::Selection;
use crate::parser::parse_str;
use crate::simulation::{spawn_analysis, AnalysisEvent, ANALYSIS_TICK};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FIRST_UPLOAD: &str = "transaction_id,amount,is_fraudulent,card_type,purchase_category
1,10.00,1,Visa,Travel
2,20.00,0,Amex,Groceries
3,5.00,1,Visa,Electronics";

const SECOND_UPLOAD: &str = "transaction_id,amount,is_fraudulent,card_type,purchase_category
7,70.00,0,Discover,Gaming
8,80.00,1,MasterCard,Gaming";

#[test]
fn test_new_session_is_idle_and_empty() {
    let session = AnalyzerSession::new();

    assert_eq!(session.status(), AnalysisStatus::Idle);
    assert!(session.records().is_empty());
    assert!(session.statistics().is_none());
    assert!(session.filter().fraud_only);
}

#[test]
fn test_install_derives_statistics_and_options() -> Result<()> {
    let mut session = AnalyzerSession::new();
    session.install(parse_str(FIRST_UPLOAD)?);

    assert_eq!(session.status(), AnalysisStatus::Ready);
    assert_eq!(session.statistics().map(|statistics| statistics.fraudulent), Some(2));
    assert_eq!(session.options().categories, vec!["Travel", "Groceries", "Electronics"]);

    Ok(())
}

#[test]
fn test_filter_changes_leave_statistics_untouched() -> Result<()> {
    let mut session = AnalyzerSession::new();
    session.install(parse_str(FIRST_UPLOAD)?);
    let before = session.statistics().cloned();

    session.set_fraud_only(false);
    session.set_card_type(Selection::Only("Amex".to_string()));

    assert_eq!(session.view().total_matches(), 1);
    assert_eq!(session.statistics().cloned(), before);

    Ok(())
}

#[test]
fn test_new_upload_replaces_records_and_resets_filters() -> Result<()> {
    let mut session = AnalyzerSession::new();
    session.install(parse_str(FIRST_UPLOAD)?);

    session.set_fraud_only(false);
    session.set_category(Selection::Only("Travel".to_string()));
    session.set_card_type(Selection::Only("Visa".to_string()));

    session.install(parse_str(SECOND_UPLOAD)?);

    let ids: Vec<&str> = session.records().iter().map(|record| record.transaction_id()).collect();

    assert_eq!(ids, vec!["7", "8"]);
    assert!(session.filter().fraud_only);
    assert_eq!(session.filter().category, Selection::All);
    assert_eq!(session.filter().card_type, Selection::All);
    assert_eq!(session.statistics().map(|statistics| statistics.total), Some(2));

    Ok(())
}

#[test]
fn test_headers_follow_the_upload_even_when_nothing_matches() -> Result<()> {
    let mut session = AnalyzerSession::new();
    assert!(session.headers().is_empty());

    session.install(parse_str(SECOND_UPLOAD)?);
    session.set_category(Selection::Only("Travel".to_string()));

    assert_eq!(session.view().total_matches(), 0);
    assert_eq!(session.headers(), &["transaction_id", "amount", "is_fraudulent", "card_type", "purchase_category"]);

    Ok(())
}

#[test]
fn test_reset_clears_upload() -> Result<()> {
    let mut session = AnalyzerSession::new();
    session.install(parse_str(FIRST_UPLOAD)?);
    session.set_category(Selection::Only("Travel".to_string()));

    session.reset();

    assert_eq!(session.status(), AnalysisStatus::Idle);
    assert!(session.records().is_empty());
    assert!(session.statistics().is_none());
    assert_eq!(session.filter().category, Selection::All);

    Ok(())
}

#[test]
fn test_progress_events_update_status() -> Result<()> {
    let mut session = AnalyzerSession::new();
    let generation = session.begin_analysis();

    assert!(session.apply(generation, AnalysisEvent::Progress(42.0)));
    assert_eq!(session.status(), AnalysisStatus::Analyzing { progress: 42.0 });

    assert!(session.apply(generation, AnalysisEvent::Complete(parse_str(FIRST_UPLOAD)?)));
    assert_eq!(session.status(), AnalysisStatus::Ready);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_load_cancels_stale_analysis() -> Result<()> {
    let mut session = AnalyzerSession::new();

    let first_generation = session.begin_analysis();
    let (first_handle, mut first_events) = spawn_analysis(parse_str(FIRST_UPLOAD)?, ANALYSIS_TICK, StdRng::seed_from_u64(1));
    session.track(first_generation, first_handle);

    let second_generation = session.begin_analysis();
    let (second_handle, mut second_events) = spawn_analysis(parse_str(SECOND_UPLOAD)?, ANALYSIS_TICK, StdRng::seed_from_u64(2));
    session.track(second_generation, second_handle);

    while let Some(event) = first_events.recv().await {
        assert!(!session.apply(first_generation, event));
    }

    while let Some(event) = second_events.recv().await {
        assert!(session.apply(second_generation, event));
    }

    let ids: Vec<&str> = session.records().iter().map(|record| record.transaction_id()).collect();

    assert_eq!(ids, vec!["7", "8"]);
    assert_eq!(session.status(), AnalysisStatus::Ready);

    Ok(())
}

#[test]
fn test_late_completion_from_replaced_load_is_ignored() -> Result<()> {
    let mut session = AnalyzerSession::new();

    let stale = session.begin_analysis();
    let current = session.begin_analysis();

    assert!(!session.apply(stale, AnalysisEvent::Complete(parse_str(FIRST_UPLOAD)?)));
    assert!(session.records().is_empty());
    assert_eq!(session.status(), AnalysisStatus::Analyzing { progress: 0.0 });

    assert!(session.apply(current, AnalysisEvent::Complete(parse_str(SECOND_UPLOAD)?)));
    assert_eq!(session.records().len(), 2);

    Ok(())
}
