//! Helpers shared by the request types and the HTTP client.

use serde::Serialize;
use serde_json::Value;

use super::{
    error::{Error, Result},
    signing::Params,
};

/// Flattens a request struct into ordered query parameters.
///
/// Field order follows the struct declaration (`serde_json` is built with
/// `preserve_order`). `null` fields are skipped; strings are taken verbatim
/// and other scalars use their JSON text.
pub(super) fn to_params<T: Serialize>(value: &T) -> Result<Params> {
    let Value::Object(map) = serde_json::to_value(value)? else {
        return Err(Error::invalid("request", "must serialize to an object"));
    };

    let mut params = Params::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => {
                params.push(key, s);
            }
            Value::Bool(b) => {
                params.push(key, b);
            }
            Value::Number(n) => {
                params.push(key, n);
            }
            other => {
                return Err(Error::invalid(
                    key,
                    format!("unsupported query value {other}"),
                ));
            }
        }
    }
    Ok(params)
}

/// Percent-decodes a query string into ordered pairs.
///
/// Only used to check what actually went over the wire.
#[cfg(test)]
pub(super) fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde::Serialize;
    use serde_with::skip_serializing_none;

    use super::*;

    #[skip_serializing_none]
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        symbol: String,
        order_id: Option<u64>,
        quantity: rust_decimal::Decimal,
        is_isolated: bool,
        #[serde(skip)]
        recv_window: Option<u64>,
    }

    #[test]
    fn test_to_params_order_and_skips() {
        let sample = Sample {
            symbol: "BNBBTC".into(),
            order_id: None,
            quantity: dec!(0.50),
            is_isolated: false,
            recv_window: Some(1),
        };
        let params = to_params(&sample).unwrap();
        assert_eq!(
            params.to_query(),
            "symbol=BNBBTC&quantity=0.50&isIsolated=false"
        );
    }

    #[test]
    fn test_to_params_rejects_non_object() {
        assert!(to_params(&vec![1, 2]).is_err());
    }

    #[test]
    fn test_parse_query() {
        let pairs = parse_query("symbol=ETHBTC&id=a%2Bb");
        assert_eq!(pairs[1], ("id".into(), "a+b".into()));
    }
}
