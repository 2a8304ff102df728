//! Integration tests for the instance infoset codec

use apimodel_declaration::Primitive;
use apimodel_foundation::QName;
use apimodel_model::infoset::{decode, encode};
use apimodel_model::{
    CodecError, ComplexType, Event, Instance, Member, Model, ModelParts, Shape, TypeDefinition,
    TypeId, TypeKind,
};
use proptest::prelude::*;

// =============================================================================
// Fixtures
// =============================================================================

fn complex(id: u32, local: &str, base: Option<u32>, members: Vec<Member>) -> TypeDefinition {
    TypeDefinition {
        id: TypeId(id),
        qname: QName::new("urn:shop", local),
        declaration: format!("shop.{local}"),
        doc: None,
        kind: TypeKind::Complex(ComplexType {
            base: base.map(TypeId),
            members,
            ..ComplexType::default()
        }),
    }
}

fn text() -> Shape {
    Shape::Value(Primitive::String)
}

/// `Entity { @id }`, `Price { @currency, value }`,
/// `Order : Entity { price: Price, item*: String }`
fn shop() -> Model {
    let entity = complex(
        0,
        "entity",
        None,
        vec![Member::attribute("id", QName::unqualified("id"), text())],
    );
    let price = complex(
        1,
        "price",
        None,
        vec![
            Member::attribute("currency", QName::unqualified("currency"), text()),
            Member::value("amount", Shape::Value(Primitive::Decimal)),
        ],
    );
    let order = complex(
        2,
        "order",
        Some(0),
        vec![
            Member::element("price", QName::unqualified("price"), Shape::Reference(TypeId(1))),
            Member::element("item", QName::unqualified("item"), text().collection()),
        ],
    );
    Model::from(ModelParts {
        types: vec![entity, price, order],
        ..ModelParts::default()
    })
}

fn order_root() -> QName {
    QName::new("urn:shop", "order")
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn inherited_attributes_come_first() {
    let model = shop();
    let order = Instance::complex()
        .with_attribute("id", "o-1")
        .with_element(
            "price",
            Instance::complex()
                .with_attribute("currency", "EUR")
                .with_text("9.50"),
        )
        .with_element("item", Instance::text("pen"))
        .with_element("item", Instance::text("ink"));

    let events = encode(&model, TypeId(2), &order_root(), &order).unwrap();
    assert_eq!(
        events,
        vec![
            Event::Start(order_root()),
            Event::Attribute(QName::unqualified("id"), "o-1".to_string()),
            Event::Start(QName::unqualified("price")),
            Event::Attribute(QName::unqualified("currency"), "EUR".to_string()),
            Event::Text("9.50".to_string()),
            Event::End,
            Event::Start(QName::unqualified("item")),
            Event::Text("pen".to_string()),
            Event::End,
            Event::Start(QName::unqualified("item")),
            Event::Text("ink".to_string()),
            Event::End,
            Event::End,
        ]
    );
    assert_eq!(decode(&model, TypeId(2), &events).unwrap(), order);
}

#[test]
fn single_valued_member_rejects_repeats() {
    let model = shop();
    let price = || Instance::complex().with_text("1");
    let order = Instance::complex()
        .with_element("price", price())
        .with_element("price", price());
    assert_eq!(
        encode(&model, TypeId(2), &order_root(), &order),
        Err(CodecError::TooManyOccurrences {
            member: "price".to_string(),
            count: 2
        })
    );
}

#[test]
fn text_without_value_member_is_rejected() {
    let model = shop();
    let order = Instance::complex().with_text("loose");
    assert!(matches!(
        encode(&model, TypeId(2), &order_root(), &order),
        Err(CodecError::ShapeMismatch { .. })
    ));
}

#[test]
fn unknown_type_is_rejected() {
    let model = shop();
    assert_eq!(
        encode(&model, TypeId(9), &order_root(), &Instance::complex()),
        Err(CodecError::UnknownType(TypeId(9)))
    );
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn trailing_events_are_rejected() {
    let model = shop();
    let events = vec![
        Event::Start(order_root()),
        Event::End,
        Event::Start(order_root()),
    ];
    assert!(matches!(
        decode(&model, TypeId(2), &events),
        Err(CodecError::UnexpectedEvent { .. })
    ));
}

#[test]
fn empty_stream_is_rejected() {
    assert_eq!(
        decode(&shop(), TypeId(2), &[]),
        Err(CodecError::UnexpectedEnd)
    );
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn orders_round_trip(
        id in proptest::option::of("[a-z0-9-]{1,8}"),
        price in proptest::option::of(("[A-Z]{3}", "[0-9]{1,4}\\.[0-9]{2}")),
        items in prop::collection::vec("[a-z ]{1,10}", 0..8),
    ) {
        let model = shop();
        let mut order = Instance::complex();
        if let Some(id) = &id {
            order = order.with_attribute("id", id.clone());
        }
        if let Some((currency, amount)) = &price {
            order = order.with_element(
                "price",
                Instance::complex()
                    .with_attribute("currency", currency.clone())
                    .with_text(amount.clone()),
            );
        }
        for item in &items {
            order = order.with_element("item", Instance::text(item.clone()));
        }

        let events = encode(&model, TypeId(2), &order_root(), &order).unwrap();
        prop_assert_eq!(decode(&model, TypeId(2), &events).unwrap(), order);
    }
}
