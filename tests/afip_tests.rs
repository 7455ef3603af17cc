#![cfg(feature = "afip")]

use rust_decimal_macros::dec;
use subdiario::afip::*;
use subdiario::core::{AfipTransaction, SubdiarioError};

const WSFE_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FECAESolicitarResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FECAESolicitarResult>
        <FeCabResp>
          <Cuit>30500010912</Cuit>
          <PtoVta>2</PtoVta>
          <CbteTipo>19</CbteTipo>
          <Resultado>A</Resultado>
        </FeCabResp>
        <FeDetResp>
          <FECAEDetResponse>
            <Concepto>2</Concepto>
            <MonId>DOL</MonId>
            <MonCotiz>  912.75  </MonCotiz>
          </FECAEDetResponse>
        </FeDetResp>
      </FECAESolicitarResult>
    </FECAESolicitarResponse>
  </soap:Body>
</soap:Envelope>"#;

fn transaction(result: &str, xml: &str) -> AfipTransaction {
    AfipTransaction {
        result: result.into(),
        xml_response: xml.into(),
    }
}

#[test]
fn soap_response_quotation() {
    assert_eq!(extract_quotation(WSFE_RESPONSE).unwrap(), Some(dec!(912.75)));
}

#[test]
fn prefixed_element() {
    let xml = "<ns1:Resp xmlns:ns1=\"urn:x\"><ns1:MonCotiz>1.5</ns1:MonCotiz></ns1:Resp>";
    assert_eq!(extract_quotation(xml).unwrap(), Some(dec!(1.5)));
}

#[test]
fn response_without_quotation() {
    assert_eq!(extract_quotation("<Resp><MonId>PES</MonId></Resp>").unwrap(), None);
    assert_eq!(extract_quotation("").unwrap(), None);
}

#[test]
fn bad_quotation_value() {
    let err = extract_quotation("<Resp><MonCotiz>abc</MonCotiz></Resp>").unwrap_err();
    assert!(matches!(err, SubdiarioError::Xml(_)));
}

#[test]
fn latest_approved_wins() {
    let transactions = vec![
        transaction("A", "<R><MonCotiz>800</MonCotiz></R>"),
        transaction("A", "<R><MonCotiz>850</MonCotiz></R>"),
        transaction("R", "<R><MonCotiz>999</MonCotiz></R>"),
        transaction("A", "<R><MonId>DOL</MonId></R>"),
    ];
    assert_eq!(latest_quotation(&transactions).unwrap(), Some(dec!(850)));
}

#[test]
fn no_approved_transactions() {
    let transactions = vec![transaction("R", "<R><MonCotiz>999</MonCotiz></R>")];
    assert_eq!(latest_quotation(&transactions).unwrap(), None);
    assert_eq!(latest_quotation(&[]).unwrap(), None);
}
