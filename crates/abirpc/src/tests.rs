use crate::*;
use abipack::Error as CodecError;

// ============================================================================
//  FIXTURES
// ============================================================================

const TOKEN: &str = r#"[
    {"type": "function", "name": "balance", "constant": true},
    {"name": "send", "inputs": [{"name": "amount", "type": "uint256"}]},
    {"name": "transfer",
     "inputs": [{"name": "from", "type": "address"},
                {"name": "to", "type": "address"},
                {"name": "value", "type": "uint256"}],
     "outputs": [{"name": "success", "type": "bool"}]},
    {"name": "tuple", "inputs": [{"name": "a", "type": "tuple",
        "components": [{"name": "x", "type": "uint256"}, {"name": "y", "type": "uint256"}]}]},
    {"name": "tupleArray", "inputs": [{"name": "a", "type": "tuple[5]",
        "components": [{"name": "x", "type": "uint256"}, {"name": "y", "type": "uint256"}]}]},
    {"name": "tupleSlice", "inputs": [{"name": "a", "type": "tuple[]",
        "components": [{"name": "x", "type": "uint256"}, {"name": "y", "type": "uint256"}]}]},
    {"name": "complexTuple", "inputs": [{"name": "a", "type": "tuple[5][]",
        "components": [{"name": "x", "type": "uint256"}, {"name": "y", "type": "uint256"}]}]},
    {"type": "event", "name": "Transfer",
     "inputs": [{"name": "from", "type": "address", "indexed": true},
                {"name": "to", "type": "address", "indexed": true},
                {"name": "value", "type": "uint256"}]}
]"#;

fn token() -> Abi {
    Abi::from_json(TOKEN).unwrap_or_else(|e| panic!("fixture: {}", e))
}

fn address(byte: u8) -> Value {
    Value::Address([byte; 20])
}

fn word(v: u128) -> Vec<u8> {
    Word::from_u128(v).as_bytes().to_vec()
}

/// A stand-in hash that only records the input length.
fn length_hash(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[0] = data.len() as u8;
    out
}

// ============================================================================
//  SIGNATURES
// ============================================================================

#[test]
fn test_signatures() -> Result<()> {
    let abi = token();
    assert_eq!(abi.function("balance")?.signature(), "balance()");
    assert_eq!(abi.function("send")?.signature(), "send(uint256)");
    assert_eq!(abi.function("transfer")?.signature(), "transfer(address,address,uint256)");
    assert_eq!(abi.function("tuple")?.signature(), "tuple((uint256,uint256))");
    assert_eq!(abi.function("tupleArray")?.signature(), "tupleArray((uint256,uint256)[5])");
    assert_eq!(abi.function("tupleSlice")?.signature(), "tupleSlice((uint256,uint256)[])");
    assert_eq!(abi.function("complexTuple")?.signature(), "complexTuple((uint256,uint256)[5][])");
    assert_eq!(abi.event("Transfer")?.signature(), "Transfer(address,address,uint256)");
    Ok(())
}

#[test]
fn test_display() -> Result<()> {
    let abi = token();
    assert_eq!(
        abi.function("transfer")?.to_string(),
        "function transfer(address from, address to, uint256 value) returns(bool success)"
    );
    assert_eq!(abi.function("balance")?.to_string(), "function balance() constant returns()");
    assert_eq!(
        abi.event("Transfer")?.to_string(),
        "event Transfer(address indexed from, address indexed to, uint256 value)"
    );
    Ok(())
}

#[test]
fn test_uint_alias_same_signature() -> Result<()> {
    let short = Abi::from_json(r#"[{"name": "f", "inputs": [{"name": "a", "type": "uint"}]}]"#)?;
    let long = Abi::from_json(r#"[{"name": "f", "inputs": [{"name": "a", "type": "uint256"}]}]"#)?;
    assert_eq!(short.function("f")?.signature(), long.function("f")?.signature());
    assert_eq!(short.selector("f")?, long.selector("f")?);
    Ok(())
}

#[test]
fn test_state_mutability_implies_constant() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"name": "a", "stateMutability": "view"},
            {"name": "b", "stateMutability": "pure"},
            {"name": "c", "stateMutability": "nonpayable"}]"#,
    )?;
    assert!(abi.function("a")?.constant);
    assert!(abi.function("b")?.constant);
    assert!(!abi.function("c")?.constant);
    Ok(())
}

// ============================================================================
//  SELECTORS AND TOPICS
// ============================================================================

#[test]
fn test_keccak_selectors() -> Result<()> {
    let abi = token();
    assert_eq!(abi.selector("transfer")?, [0xbe, 0xab, 0xac, 0xc8]);
    assert_eq!(abi.selector("send")?, [0xa5, 0x2c, 0x10, 0x1e]);
    assert_eq!(abi.selector("balance")?, [0xb6, 0x9e, 0xf8, 0xa8]);
    assert_eq!(
        hex::encode(abi.topic("Transfer")?),
        "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
    );
    Ok(())
}

#[test]
fn test_selector_is_prefix_of_hash() -> Result<()> {
    let abi = token();
    for function in abi.functions().values() {
        let digest = Keccak256.hash256(function.signature().as_bytes());
        assert_eq!(&function.selector(&Keccak256)[..], &digest[..4]);
        assert_eq!(function.selector(&Keccak256), function.selector(&Keccak256));
    }
    Ok(())
}

#[test]
fn test_injected_hasher() -> Result<()> {
    let abi = Abi::builder().hasher(length_hash).parse_json(TOKEN)?;
    // "send(uint256)" is 13 bytes long
    assert_eq!(abi.selector("send")?, [13, 0, 0, 0]);
    let call = abi.pack("send", &[Value::uint(1)])?;
    assert_eq!(&call[..4], &[13, 0, 0, 0]);
    assert_eq!(abi.function_by_selector(&call)?.name, "send");
    Ok(())
}

#[test]
fn test_function_by_selector() -> Result<()> {
    let abi = token();
    let found = abi.function_by_selector(&[0xbe, 0xab, 0xac, 0xc8, 0xff])?;
    assert_eq!(found.name, "transfer");

    match abi.function_by_selector(&[0xbe, 0xab]) {
        Err(Error::ShortInput(2)) => {}
        other => panic!("expected ShortInput, got {:?}", other),
    }
    match abi.function_by_selector(&[0, 0, 0, 0]) {
        Err(Error::NotFound(NotFound::Selector([0, 0, 0, 0]))) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_event_by_topic() -> Result<()> {
    let abi = token();
    let topic = abi.topic("Transfer")?;
    assert_eq!(abi.event_by_topic(&topic)?.name, "Transfer");
    assert!(abi.event_by_topic(&[0u8; 32]).is_err_and(|e| e.is_not_found()));
    Ok(())
}

// ============================================================================
//  DISAMBIGUATION
// ============================================================================

#[test]
fn test_overloads_disambiguated() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"name": "foo", "inputs": [{"name": "a", "type": "uint256"}]},
            {"name": "foo", "inputs": [{"name": "a", "type": "address"}]},
            {"type": "event", "name": "foo"}]"#,
    )?;
    let keys: Vec<&str> = abi.functions().keys().map(String::as_str).collect();
    assert_eq!(keys, ["foo", "foo0"]);

    let second = abi.function("foo0")?;
    assert_eq!(second.raw_name, "foo");
    assert_eq!(second.signature(), "foo(address)");
    assert_eq!(abi.selector("foo")?, [0x2f, 0xbe, 0xbd, 0x38]);
    assert_eq!(abi.selector("foo0")?, [0xfd, 0xf8, 0x0b, 0xda]);

    // events live in their own namespace
    assert_eq!(abi.events().keys().collect::<Vec<_>>(), ["foo"]);
    Ok(())
}

#[test]
fn test_disambiguation_skips_taken_suffix() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"name": "foo0"}, {"name": "foo"}, {"name": "foo"}]"#,
    )?;
    let keys: Vec<&str> = abi.functions().keys().map(String::as_str).collect();
    assert_eq!(keys, ["foo0", "foo", "foo1"]);
    assert_eq!(abi.function("foo1")?.signature(), "foo()");
    Ok(())
}

// ============================================================================
//  SCHEMA LOADING
// ============================================================================

#[test]
fn test_malformed_document() {
    let err = Abi::from_json("{not json").unwrap_err();
    assert!(matches!(err, Error::Document(_)));
    assert!(err.is_schema());
}

#[test]
fn test_bad_type_string() {
    let err = Abi::from_json(r#"[{"name": "f", "inputs": [{"name": "a", "type": "uint7"}]}]"#).unwrap_err();
    assert!(matches!(err, Error::Schema(CodecError::InvalidBitSize(_))));

    let err = Abi::from_json(r#"[{"name": "f", "inputs": [{"name": "a", "type": "tuple"}]}]"#).unwrap_err();
    assert!(matches!(err, Error::Schema(CodecError::MissingComponents(_))));
}

#[test]
fn test_array_suffixes_count_toward_depth() -> Result<()> {
    let document = |ty: String| format!(r#"[{{"name": "f", "inputs": [{{"name": "a", "type": "{}"}}]}}]"#, ty);

    let hostile = document(format!("uint256{}", "[]".repeat(400_000)));
    assert!(matches!(Abi::from_json(&hostile), Err(Error::Schema(CodecError::RecursionLimitExceeded))));

    let abi = Abi::builder()
        .limits(Limits::new().max_depth(3))
        .parse_json(&document("uint8[2][][3]".to_string()))?;
    assert_eq!(abi.function("f")?.signature(), "f(uint8[2][][3])");

    // suffixes on a tuple stack on top of its components
    let nested = r#"[{"name": "g", "inputs": [{"name": "a", "type": "tuple[][]",
        "components": [{"name": "x", "type": "uint8[]"}]}]}]"#;
    assert!(Abi::builder().limits(Limits::new().max_depth(4)).parse_json(nested).is_ok());
    assert!(matches!(
        Abi::builder().limits(Limits::new().max_depth(3)).parse_json(nested),
        Err(Error::Schema(CodecError::RecursionLimitExceeded))
    ));
    Ok(())
}

#[test]
fn test_unknown_kinds_skipped() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"type": "fallback"},
            {"type": "error", "name": "Oops", "inputs": [{"name": "a", "type": "uint256"}]},
            {"name": "ok", "extra": [1, 2, 3]}]"#,
    )?;
    assert_eq!(abi.functions().len(), 1);
    assert!(abi.events().is_empty());
    assert!(abi.function("ok").is_ok());
    Ok(())
}

#[test]
fn test_constructor() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"type": "constructor", "inputs": [{"name": "supply", "type": "uint256"}]}]"#,
    )?;
    assert!(abi.constructor().is_constructor());
    assert_eq!(abi.pack("", &[Value::uint(5)])?, word(5));

    let bare = token();
    assert!(bare.constructor().inputs.is_empty());
    assert!(bare.pack("", &[])?.is_empty());
    Ok(())
}

// ============================================================================
//  CALLS
// ============================================================================

#[test]
fn test_pack_transfer() -> Result<()> {
    let abi = token();
    let call = abi.pack("transfer", &[address(1), address(2), Value::uint(10)])?;
    assert_eq!(call.len(), 4 + 3 * 32);
    assert_eq!(&call[..4], &[0xbe, 0xab, 0xac, 0xc8]);
    assert_eq!(&call[4 + 12..4 + 32], &[1u8; 20]);
    assert_eq!(&call[4 + 64..], word(10).as_slice());
    Ok(())
}

#[test]
fn test_decode_call() -> Result<()> {
    let abi = token();
    let args = vec![address(7), address(8), Value::uint(1_000_000)];
    let call = abi.pack("transfer", &args)?;
    let (function, decoded) = abi.decode_call(&call)?;
    assert_eq!(function.name, "transfer");
    assert_eq!(decoded, args);
    Ok(())
}

#[test]
fn test_decode_call_without_inputs() -> Result<()> {
    let abi = token();
    let call = abi.pack("balance", &[])?;
    assert_eq!(call, [0xb6, 0x9e, 0xf8, 0xa8]);
    let (function, decoded) = abi.decode_call(&call)?;
    assert_eq!(function.name, "balance");
    assert!(decoded.is_empty());

    // stray data after a selector that takes no arguments is still checked
    let mut padded = call.clone();
    padded.extend([0u8; 7]);
    assert!(matches!(abi.decode_call(&padded), Err(Error::Decoding(CodecError::UnalignedInput(7)))));
    Ok(())
}

#[test]
fn test_pack_tuple_slice() -> Result<()> {
    let abi = token();
    let point = |x: u128, y: u128| Value::Tuple(vec![Value::uint(x), Value::uint(y)]);
    let arg = Value::Array(vec![point(1, 2), point(3, 4)]);
    let call = abi.pack("tupleSlice", std::slice::from_ref(&arg))?;
    // offset, length, two inline pairs
    assert_eq!(call.len(), 4 + 6 * 32);
    let (_, decoded) = abi.decode_call(&call)?;
    assert_eq!(decoded, vec![arg]);
    Ok(())
}

#[test]
fn test_pack_errors() {
    let abi = token();
    match abi.pack("send", &[]) {
        Err(Error::Encoding(CodecError::ArgumentCount { expected: 1, found: 0 })) => {}
        other => panic!("expected ArgumentCount, got {:?}", other),
    }
    match abi.pack("send", &[Value::from("one")]) {
        Err(Error::Encoding(CodecError::TypeMismatch { .. })) => {}
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
    match abi.pack("missing", &[]) {
        Err(Error::NotFound(NotFound::Function(name))) => assert_eq!(name, "missing"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

// ============================================================================
//  RETURN DATA
// ============================================================================

#[test]
fn test_unpack_outputs() -> Result<()> {
    let abi = token();
    assert_eq!(abi.unpack("transfer", &word(1))?, vec![Value::Bool(true)]);

    let named = abi.unpack_into_map("transfer", &word(0))?;
    assert_eq!(named.get("success"), Some(&Value::Bool(false)));
    Ok(())
}

#[test]
fn test_unpack_into_map_skips_unnamed() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"name": "get", "outputs": [{"name": "", "type": "uint256"}, {"name": "ok", "type": "bool"}]}]"#,
    )?;
    let mut data = word(9);
    data.extend(word(1));
    let named = abi.unpack_into_map("get", &data)?;
    assert_eq!(named.len(), 1);
    assert_eq!(named["ok"], Value::Bool(true));
    assert_eq!(abi.unpack("get", &data)?.len(), 2);
    Ok(())
}

#[test]
fn test_unpack_length_guard() {
    let abi = token();
    assert!(matches!(abi.unpack("transfer", &[]), Err(Error::Decoding(CodecError::EmptyInput))));
    assert!(matches!(
        abi.unpack("transfer", &[0u8; 31]),
        Err(Error::Decoding(CodecError::UnalignedInput(31)))
    ));
    assert!(matches!(
        abi.unpack("Transfer", &[0u8; 33]),
        Err(Error::Decoding(CodecError::UnalignedInput(33)))
    ));
}

#[test]
fn test_unpack_unknown_entry() {
    let abi = token();
    match abi.unpack("nothing", &word(1)) {
        Err(Error::NotFound(NotFound::Entry(name))) => assert_eq!(name, "nothing"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

// ============================================================================
//  LOGS
// ============================================================================

#[test]
fn test_event_data_excludes_indexed() -> Result<()> {
    let abi = token();
    assert_eq!(abi.unpack("Transfer", &word(42))?, vec![Value::uint(42)]);
    let named = abi.unpack_into_map("Transfer", &word(42))?;
    assert_eq!(named.keys().collect::<Vec<_>>(), ["value"]);
    Ok(())
}

#[test]
fn test_transfer_log() -> Result<()> {
    let abi = token();
    let topics = abi.encode_topics("Transfer", &[address(1), address(2)])?;
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[0], abi.topic("Transfer")?);
    assert_eq!(&topics[1][..12], &[0u8; 12]);
    assert_eq!(&topics[1][12..], &[1u8; 20]);

    let fields = abi.unpack_log("Transfer", &topics, &word(500))?;
    let names: Vec<&str> = fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["from", "to", "value"]);
    assert_eq!(fields["from"], address(1));
    assert_eq!(fields["to"], address(2));
    assert_eq!(fields["value"], Value::uint(500));
    Ok(())
}

#[test]
fn test_hashed_indexed_fields() -> Result<()> {
    let abi = Abi::from_json(
        r#"[{"type": "event", "name": "Note", "anonymous": true,
             "inputs": [{"name": "text", "type": "string", "indexed": true},
                        {"name": "ids", "type": "uint256[]", "indexed": true}]}]"#,
    )?;
    let ids = Value::Array(vec![Value::uint(1), Value::uint(2)]);
    let topics = abi.encode_topics("Note", &[Value::from("hi"), ids.clone()])?;

    // anonymous: no leading topic hash
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0], Keccak256.hash256(b"hi"));
    let ty = Type::parse("uint256[]").map_err(Error::Schema)?;
    let encoded = abipack::Encoder::new().encode_value(&ty, &ids).map_err(Error::Encoding)?;
    assert_eq!(topics[1], Keccak256.hash256(&encoded));

    let fields = abi.unpack_log("Note", &topics, &[])?;
    assert_eq!(fields["text"], Value::FixedBytes(topics[0].to_vec()));
    assert_eq!(fields["ids"], Value::FixedBytes(topics[1].to_vec()));
    Ok(())
}

#[test]
fn test_topic_count_checked() {
    let abi = token();
    match abi.unpack_log("Transfer", &[[0u8; 32]], &word(1)) {
        Err(Error::TopicCount { expected: 3, found: 1 }) => {}
        other => panic!("expected TopicCount, got {:?}", other),
    }
    match abi.encode_topics("Transfer", &[address(1)]) {
        Err(Error::Encoding(CodecError::ArgumentCount { expected: 2, found: 1 })) => {}
        other => panic!("expected ArgumentCount, got {:?}", other),
    }
}

#[test]
fn test_limits_reach_decoder() -> Result<()> {
    let abi = Abi::builder()
        .limits(Limits::new().max_length(4))
        .parse_json(r#"[{"name": "f", "outputs": [{"name": "b", "type": "bytes"}]}]"#)?;
    let mut data = word(32);
    data.extend(word(5));
    data.extend([0u8; 32]);
    assert!(matches!(abi.unpack("f", &data), Err(Error::Decoding(CodecError::LengthOverflow))));
    Ok(())
}
