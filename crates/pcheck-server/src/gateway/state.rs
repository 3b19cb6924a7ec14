use pcheck::ComplianceService;

#[derive(Clone)]
pub struct HandlerState {
    pub service: ComplianceService,
}

impl HandlerState {
    pub fn new(service: ComplianceService) -> Self {
        Self { service }
    }
}
