use crate::prelude::{launches_on, Config, Error, FormatError, SatcatEntry, TleSource};

use log::Level;

use crate::{
    catalog::parse_satcat,
    tests::{init_logger, CaptureRecorder, CaptureSleeper, MockFetcher},
};

const SATCAT: &str = "OBJECT_NAME,OBJECT_ID,NORAD_CAT_ID,OBJECT_TYPE,OPS_STATUS_CODE,OWNER,LAUNCH_DATE,LAUNCH_SITE
ISS (ZARYA),1998-067A,25544,PAY,+,ISS,1998-11-20,TTMTR
SL-13 R/B,1998-067B,25545,R/B,D,CIS,1998-11-20,TTMTR
STARLINK-1007,2019-074A,44713,PAY,+,US,2019-11-11,AFETR
";

#[test]
fn satcat_date_filter() {
    init_logger();

    let entries = parse_satcat(SATCAT.as_bytes(), "1998-11-20").unwrap();

    assert_eq!(
        entries,
        vec![
            SatcatEntry {
                object_name: "ISS (ZARYA)".to_string(),
                object_id: "1998-067A".to_string(),
                norad_cat_id: 25544,
                launch_date: "1998-11-20".to_string(),
            },
            SatcatEntry {
                object_name: "SL-13 R/B".to_string(),
                object_id: "1998-067B".to_string(),
                norad_cat_id: 25545,
                launch_date: "1998-11-20".to_string(),
            },
        ]
    );

    let entries = parse_satcat(SATCAT.as_bytes(), "2001-01-01").unwrap();
    assert!(entries.is_empty());
}

#[test]
fn satcat_missing_column() {
    let content = "OBJECT_NAME,NORAD_CAT_ID,LAUNCH_DATE\nISS (ZARYA),25544,1998-11-20\n";
    assert!(matches!(
        parse_satcat(content.as_bytes(), "1998-11-20"),
        Err(FormatError::Catalog(_))
    ));
}

#[test]
fn remote_launch_search() {
    init_logger();

    let recorder = CaptureRecorder::default();
    let fetcher = MockFetcher::new(vec![Ok(SATCAT.to_string())]);
    let source = TleSource::new(&fetcher, &Config::default()).with_recorder(recorder.clone());

    let entries = launches_on(&source, "2019-11-11").unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].norad_cat_id, 44713);
    assert_eq!(fetcher.urls(), vec!["https://celestrak.org/pub/satcat.csv"]);

    assert!(recorder
        .messages()
        .iter()
        .any(|msg| msg == "2019-11-11: 1 launched object(s)"));
}

#[test]
fn remote_launch_search_retries() {
    let fetcher = MockFetcher::failing();
    let sleeper = CaptureSleeper::default();
    let source = TleSource::new(&fetcher, &Config::default()).with_sleeper(sleeper.sleeper());

    assert!(matches!(
        launches_on(&source, "2019-11-11"),
        Err(Error::SourceUnavailable { attempts: 3, .. })
    ));
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(sleeper.pauses().len(), 2);
}

#[test]
fn invalid_launch_date() {
    let fetcher = MockFetcher::failing();
    let source = TleSource::new(&fetcher, &Config::default());

    assert!(matches!(
        launches_on(&source, "2019-11-31"),
        Err(Error::InvalidParameter(_))
    ));
    assert_eq!(fetcher.calls(), 0);
}
