use di_abstractions::{Component, Contract};
use di_macros::{Component, Injectable};

trait Wheel: Send + Sync {}
trait Spare: Send + Sync {}

#[derive(Default, Injectable, Component)]
#[component(implements(dyn Wheel, dyn Spare))]
struct Tire;

impl Wheel for Tire {}
impl Spare for Tire {}

fn main() {
    let contracts = <Tire as Component>::contracts();
    assert!(contracts.satisfies(&Contract::of::<dyn Wheel>()));
    assert!(contracts.satisfies(&Contract::of::<dyn Spare>()));
    assert!(contracts.satisfies(&Contract::of::<Tire>()));
}
