//! 注册表集成测试：绑定、解析、注入与清空

use di_abstractions::{
    Binding, BindingKey, Contract, Dependency, DynamicObject, InjectionDescriptor, RegistryExt,
    ServiceRegistry,
};
use di_impl::DiRegistry;
use di_macros::{Component, Injectable};
use infrastructure_common::{BindingError, InjectionError};
use std::sync::Arc;

/// 车辆零件
trait VehiclePart: Send + Sync {
    fn value(&self) -> u32;
}

/// 车辆
trait Vehicle: Send + Sync {
    fn part(&self) -> Option<Arc<dyn VehiclePart>>;
}

#[derive(Default, Injectable, Component)]
#[component(implements(dyn VehiclePart))]
struct Tire;

impl VehiclePart for Tire {
    fn value(&self) -> u32 {
        1000
    }
}

#[derive(Default, Injectable, Component)]
#[component(implements(dyn Vehicle))]
struct Car {
    #[inject(contract = dyn VehiclePart)]
    part: Dependency<dyn VehiclePart>,
}

impl Vehicle for Car {
    fn part(&self) -> Option<Arc<dyn VehiclePart>> {
        self.part.get()
    }
}

/// 依赖车辆的车库，用于验证递归注入
#[derive(Default, Injectable, Component)]
struct Garage {
    #[inject(contract = dyn Vehicle)]
    vehicle: Dependency<dyn Vehicle>,
}

/// 不满足任何契约的类型
#[derive(Default, Injectable, Component)]
struct House;

#[test]
fn test_named_value_round_trip() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();
    registry.bind_value("name", String::from("lorn")).unwrap();

    assert_eq!(*registry.resolve::<i32, _>("v").unwrap().unwrap(), 42);
    assert_eq!(
        registry.resolve::<String, _>("name").unwrap().unwrap().as_str(),
        "lorn"
    );
}

#[test]
fn test_get_unbound_returns_none() {
    let registry = DiRegistry::new();
    assert!(registry.get(&BindingKey::from("missing")).unwrap().is_none());
    assert!(registry.resolve_contract::<dyn Vehicle>().unwrap().is_none());
}

#[test]
fn test_contract_instance_binding_returns_same_instance() {
    let registry = DiRegistry::new();
    registry
        .bind_instance(Contract::of::<dyn VehiclePart>(), Tire)
        .unwrap();

    let key = BindingKey::contract::<dyn VehiclePart>();
    let first = registry.get(&key).unwrap().unwrap();
    let second = registry.get(&key).unwrap().unwrap();
    assert!(first.same_instance(&second));
    assert_eq!(first.downcast::<dyn VehiclePart>().unwrap().value(), 1000);
}

#[test]
fn test_contract_class_binding_constructs_fresh_instances() {
    let registry = DiRegistry::new();
    registry
        .bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())
        .unwrap();

    let key = BindingKey::contract::<dyn VehiclePart>();
    let first = registry.get(&key).unwrap().unwrap();
    let second = registry.get(&key).unwrap().unwrap();
    assert!(!first.same_instance(&second));
    assert_eq!(first.downcast::<dyn VehiclePart>().unwrap().value(), 1000);
    assert_eq!(second.downcast::<dyn VehiclePart>().unwrap().value(), 1000);
}

#[test]
fn test_named_class_and_instance_bindings() {
    let registry = DiRegistry::new();
    registry.bind_class::<_, Tire>("tire-class").unwrap();
    registry.bind_instance("tire-instance", Tire).unwrap();

    let a = registry.resolve::<Tire, _>("tire-class").unwrap().unwrap();
    let b = registry.resolve::<Tire, _>("tire-class").unwrap().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));

    let c = registry.resolve::<Tire, _>("tire-instance").unwrap().unwrap();
    let d = registry.resolve::<Tire, _>("tire-instance").unwrap().unwrap();
    assert!(Arc::ptr_eq(&c, &d));
}

#[test]
fn test_class_is_not_its_own_subtype() {
    let registry = DiRegistry::new();
    let err = registry
        .bind_class::<_, Tire>(Contract::of::<Tire>())
        .unwrap_err();

    assert_eq!(err, BindingError::not_a_subtype("Tire", "Tire"));
    assert!(!registry.is_bound(&BindingKey::contract::<Tire>()));
}

#[test]
fn test_instance_satisfies_its_own_type() {
    let registry = DiRegistry::new();
    registry.bind_instance(Contract::of::<Tire>(), Tire).unwrap();

    let tire = registry.resolve_contract::<Tire>().unwrap().unwrap();
    assert_eq!(tire.value(), 1000);
}

#[test]
fn test_bind_plain_value_to_contract_fails() {
    let registry = DiRegistry::new();
    let err = registry
        .bind(BindingKey::contract::<dyn VehiclePart>(), Binding::value(42_i32))
        .unwrap_err();

    assert!(matches!(err, BindingError::UnsupportedValue { .. }));
    assert!(!registry.is_bound(&BindingKey::contract::<dyn VehiclePart>()));
}

#[test]
fn test_bind_non_conforming_instance_fails() {
    let registry = DiRegistry::new();
    let err = registry
        .bind_instance(Contract::of::<dyn VehiclePart>(), House)
        .unwrap_err();

    assert_eq!(
        err,
        BindingError::not_an_instance("House", "dyn VehiclePart")
    );
}

#[test]
fn test_bind_non_conforming_class_fails() {
    let registry = DiRegistry::new();
    let err = registry
        .bind_class::<_, House>(Contract::of::<dyn Vehicle>())
        .unwrap_err();

    assert!(matches!(err, BindingError::NotASubtype { .. }));
}

#[test]
fn test_bind_with_numeric_key_fails() {
    let registry = DiRegistry::new();
    let err = registry
        .bind_dynamic(&58_i32, Binding::value(42_i32))
        .unwrap_err();

    assert!(matches!(err, BindingError::InvalidKey { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_bind_with_dynamic_string_key() {
    let registry = DiRegistry::new();
    registry
        .bind_dynamic(&String::from("v"), Binding::value(42_i32))
        .unwrap();
    registry
        .bind_dynamic(&Contract::of::<dyn VehiclePart>(), Binding::class::<Tire>())
        .unwrap();

    assert_eq!(*registry.resolve::<i32, _>("v").unwrap().unwrap(), 42);
    assert!(registry.resolve_contract::<dyn VehiclePart>().unwrap().is_some());
}

#[test]
fn test_inject_without_descriptor_is_noop() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();

    let object = DynamicObject::new("plain");
    let injected = registry.inject_into(&object).unwrap();
    assert!(std::ptr::eq(injected, &object));
    assert_eq!(object.attribute_count(), 0);
}

#[test]
fn test_inject_sequence_form() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();

    let object =
        DynamicObject::new("holder").with_injection(InjectionDescriptor::sequence(["v"]));
    registry.inject(&object).unwrap();

    let value = object.attribute("v").unwrap().downcast::<i32>().unwrap();
    assert_eq!(*value, 42);
}

#[test]
fn test_inject_sequence_form_allows_missing() {
    let registry = DiRegistry::new();

    let object =
        DynamicObject::new("holder").with_injection(InjectionDescriptor::sequence(["missing"]));
    registry.inject(&object).unwrap();

    // 属性被写入为空
    assert!(object.has_attribute("missing"));
    assert!(object.attribute("missing").is_none());
}

#[test]
fn test_inject_sequence_form_strict_mode() {
    let registry = DiRegistry::new().with_strict_sequence_injection(true);

    let object =
        DynamicObject::new("holder").with_injection(InjectionDescriptor::sequence(["missing"]));
    let err = registry.inject(&object).unwrap_err();

    assert_eq!(err, InjectionError::unresolved("missing", "holder"));
}

#[test]
fn test_inject_mapping_form() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();

    let object = DynamicObject::new("holder")
        .with_injection(InjectionDescriptor::mapping([("value", "v")]));
    registry.inject(&object).unwrap();

    let value = object.attribute("value").unwrap().downcast::<i32>().unwrap();
    assert_eq!(*value, 42);
    assert!(!object.has_attribute("v"));
}

#[test]
fn test_inject_mapping_form_unbound_fails() {
    let registry = DiRegistry::new();

    let object = DynamicObject::new("holder")
        .with_injection(InjectionDescriptor::mapping([("value", "missing")]));
    let err = registry.inject(&object).unwrap_err();

    assert_eq!(err, InjectionError::unresolved("value", "holder"));
    assert_eq!(err.to_string(), "无法将 value 注入到 holder");
}

#[test]
fn test_get_injects_named_dynamic_object() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();
    let holder = DynamicObject::new("holder")
        .with_injection(InjectionDescriptor::mapping([("value", "v")]));
    registry
        .bind(BindingKey::from("holder"), Binding::injectable(holder))
        .unwrap();

    let holder = registry
        .resolve::<DynamicObject, _>("holder")
        .unwrap()
        .unwrap();
    let value = holder.attribute("value").unwrap().downcast::<i32>().unwrap();
    assert_eq!(*value, 42);
}

#[test]
fn test_get_named_dynamic_object_with_unbound_dependency_fails() {
    let registry = DiRegistry::new();
    let holder = DynamicObject::new("holder")
        .with_injection(InjectionDescriptor::mapping([("value", "missing")]));
    registry.bind_instance("holder", holder).unwrap();

    let err = registry.get(&BindingKey::from("holder")).unwrap_err();
    assert_eq!(err, InjectionError::unresolved("value", "holder"));
}

#[test]
fn test_get_class_with_unresolved_dependency_fails() {
    let registry = DiRegistry::new();
    registry
        .bind_class::<_, Car>(Contract::of::<dyn Vehicle>())
        .unwrap();

    let err = registry
        .resolve_contract::<dyn Vehicle>()
        .err()
        .expect("缺少零件时解析应失败");
    assert_eq!(err, InjectionError::unresolved("part", "Car"));
}

#[test]
fn test_vehicle_scenario() {
    let registry = DiRegistry::new();
    registry
        .bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())
        .unwrap();
    registry
        .bind_class::<_, Car>(Contract::of::<dyn Vehicle>())
        .unwrap();

    let first = registry.resolve_contract::<dyn Vehicle>().unwrap().unwrap();
    let second = registry.resolve_contract::<dyn Vehicle>().unwrap().unwrap();

    let first_part = first.part().unwrap();
    let second_part = second.part().unwrap();
    assert_eq!(first_part.value(), 1000);
    assert!(!Arc::ptr_eq(&first_part, &second_part));
}

#[test]
fn test_recursive_injection_chain() {
    let registry = DiRegistry::new();
    registry
        .bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())
        .unwrap();
    registry
        .bind_class::<_, Car>(Contract::of::<dyn Vehicle>())
        .unwrap();
    registry.bind_class::<_, Garage>("garage").unwrap();

    let garage = registry.resolve::<Garage, _>("garage").unwrap().unwrap();
    let vehicle = garage.vehicle.get().unwrap();
    assert_eq!(vehicle.part().unwrap().value(), 1000);
}

#[test]
fn test_reset_clears_all_bindings() {
    let registry = DiRegistry::new();
    registry.bind_value("v", 42_i32).unwrap();
    registry
        .bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())
        .unwrap();

    registry.reset();

    assert!(registry.get(&BindingKey::from("v")).unwrap().is_none());
    assert!(registry.resolve_contract::<dyn VehiclePart>().unwrap().is_none());
    assert!(registry.bound_keys().is_empty());
}

#[test]
fn test_concurrent_resolution() {
    let registry = DiRegistry::new();
    registry
        .bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())
        .unwrap();
    registry
        .bind_class::<_, Car>(Contract::of::<dyn Vehicle>())
        .unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let vehicle = registry.resolve_contract::<dyn Vehicle>().unwrap().unwrap();
                    assert_eq!(vehicle.part().unwrap().value(), 1000);
                }
            });
        }
    });
}
