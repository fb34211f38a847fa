//! End-to-end parsing of instance documents into segment breakdowns.

use chrono::NaiveDate;
use filings_core::{Segment, SegmentType};
use filings_edgar::{REVENUE_CONCEPTS, aggregate_segments, parse_contexts, parse_revenue_facts};

/// Inline-XBRL document: contexts live in `ix:resources`, facts in the HTML body.
const INLINE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:ix="http://www.xbrl.org/2013/inlineXBRL"
      xmlns:xbrli="http://www.xbrl.org/2003/instance" xmlns:xbrldi="http://xbrl.org/2006/xbrldi">
<head><title>acme-20231231</title></head>
<body>
<div style="display:none">
  <ix:header>
    <ix:resources>
      <xbrli:context id="c1">
        <xbrli:entity>
          <xbrli:identifier scheme="http://www.sec.gov/CIK">0000000042</xbrli:identifier>
          <xbrli:segment><xbrldi:explicitMember dimension="us-gaap:StatementBusinessSegmentsAxis">acme:CloudSegmentMember</xbrldi:explicitMember></xbrli:segment>
        </xbrli:entity>
        <xbrli:period><xbrli:startDate>2023-01-01</xbrli:startDate><xbrli:endDate>2023-12-31</xbrli:endDate></xbrli:period>
      </xbrli:context>
      <xbrli:context id="c2">
        <xbrli:entity>
          <xbrli:identifier scheme="http://www.sec.gov/CIK">0000000042</xbrli:identifier>
          <xbrli:segment><xbrldi:explicitMember dimension="us-gaap:StatementBusinessSegmentsAxis">acme:DevicesSegmentMember</xbrldi:explicitMember></xbrli:segment>
        </xbrli:entity>
        <xbrli:period><xbrli:startDate>2023-01-01</xbrli:startDate><xbrli:endDate>2023-12-31</xbrli:endDate></xbrli:period>
      </xbrli:context>
      <xbrli:context id="c3">
        <xbrli:entity>
          <xbrli:identifier scheme="http://www.sec.gov/CIK">0000000042</xbrli:identifier>
          <xbrli:segment><xbrldi:explicitMember dimension="us-gaap:StatementGeographicalAxis">country:US</xbrldi:explicitMember></xbrli:segment>
        </xbrli:entity>
        <xbrli:period><xbrli:startDate>2023-01-01</xbrli:startDate><xbrli:endDate>2023-12-31</xbrli:endDate></xbrli:period>
      </xbrli:context>
      <xbrli:context id="c-prior">
        <xbrli:entity>
          <xbrli:identifier scheme="http://www.sec.gov/CIK">0000000042</xbrli:identifier>
          <xbrli:segment><xbrldi:explicitMember dimension="us-gaap:StatementBusinessSegmentsAxis">acme:CloudSegmentMember</xbrldi:explicitMember></xbrli:segment>
        </xbrli:entity>
        <xbrli:period><xbrli:startDate>2022-01-01</xbrli:startDate><xbrli:endDate>2022-12-31</xbrli:endDate></xbrli:period>
      </xbrli:context>
    </ix:resources>
  </ix:header>
</div>
<table>
  <tr><td>Cloud</td><td>$<ix:nonFraction name="us-gaap:Revenues" contextRef="c1" scale="6" unitRef="usd" decimals="-6">1234</ix:nonFraction></td>
      <td>$<ix:nonFraction name="us-gaap:Revenues" contextRef="c-prior" scale="6" unitRef="usd" decimals="-6">1,100</ix:nonFraction></td></tr>
  <tr><td>Devices</td><td>$<ix:nonFraction name="us-gaap:Revenues" contextRef="c2" scale="6" unitRef="usd" decimals="-6">567</ix:nonFraction></td></tr>
  <tr><td>United States</td><td>$<ix:nonFraction name="us-gaap:Revenues" contextRef="c3" scale="6" unitRef="usd" decimals="-6">1,500</ix:nonFraction></td></tr>
  <tr><td>Net income</td><td>$<ix:nonFraction name="us-gaap:NetIncomeLoss" contextRef="c1" scale="6" unitRef="usd">99</ix:nonFraction></td></tr>
</table>
<br>
</body>
</html>"#;

#[test]
fn test_inline_document_segments() {
    let contexts = parse_contexts(INLINE_DOCUMENT).unwrap();
    assert_eq!(contexts.len(), 4);

    let facts = parse_revenue_facts(INLINE_DOCUMENT).unwrap();
    assert_eq!(facts.len(), 4);

    let set = aggregate_segments(
        &facts,
        &contexts,
        REVENUE_CONCEPTS,
        NaiveDate::from_ymd_opt(2023, 12, 31),
    );

    assert_eq!(
        set.segments,
        vec![
            Segment::new("Cloud", 1_234_000_000.0),
            Segment::new("Devices", 567_000_000.0),
        ]
    );
    assert_eq!(set.segment_type, SegmentType::Business);
}

#[test]
fn test_plain_instance_geographic_segments() {
    let instance = r#"<?xml version="1.0" encoding="UTF-8"?>
<xbrl xmlns="http://www.xbrl.org/2003/instance" xmlns:us-gaap="http://fasb.org/us-gaap/2023">
  <context id="FY23_Americas">
    <entity><identifier scheme="http://www.sec.gov/CIK">0000320193</identifier>
      <segment><xbrldi:explicitMember dimension="us-gaap:StatementGeographicalAxis">aapl:AmericasSegmentMember</xbrldi:explicitMember></segment>
    </entity>
    <period><startDate>2022-09-25</startDate><endDate>2023-09-30</endDate></period>
  </context>
  <context id="FY23_Europe">
    <entity><identifier scheme="http://www.sec.gov/CIK">0000320193</identifier>
      <segment><xbrldi:explicitMember dimension="us-gaap:StatementGeographicalAxis">aapl:EuropeSegmentMember</xbrldi:explicitMember></segment>
    </entity>
    <period><startDate>2022-09-25</startDate><endDate>2023-09-30</endDate></period>
  </context>
  <context id="FY23_AsiaPacific">
    <entity><identifier scheme="http://www.sec.gov/CIK">0000320193</identifier>
      <segment><xbrldi:explicitMember dimension="us-gaap:StatementGeographicalAxis">aapl:AsiaPacificSegmentMember</xbrldi:explicitMember></segment>
    </entity>
    <period><startDate>2022-09-25</startDate><endDate>2023-09-30</endDate></period>
  </context>
  <us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax contextRef="FY23_Americas" unitRef="usd" decimals="-6">162,560,000,000</us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax>
  <us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax contextRef="FY23_Europe" unitRef="usd" decimals="-6">94,294,000,000</us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax>
  <us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax contextRef="FY23_AsiaPacific" unitRef="usd" decimals="-6"><![CDATA[29,615,000,000]]></us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax>
</xbrl>"#;

    let contexts = parse_contexts(instance).unwrap();
    let facts = parse_revenue_facts(instance).unwrap();
    let set = aggregate_segments(&facts, &contexts, REVENUE_CONCEPTS, None);

    let names: Vec<&str> = set.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Americas", "Europe", "Asia Pacific"]);
    assert_eq!(set.segments[2].revenue, 29_615_000_000.0);
    assert_eq!(set.segment_type, SegmentType::Geographic);
}
