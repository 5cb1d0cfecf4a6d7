use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn eve(&mut self) -> EveFixtures<'_> {
        EveFixtures { setup: self }
    }
}

pub struct EveFixtures<'a> {
    pub setup: &'a mut TestContext,
}
