pub mod model;

pub use model::{
    AttributeDatatype, AttributeInfo, AttributeValue, Endpoint, EndpointType, Format,
    PostServiceRequestResponse, ProtocolError, RequestAttribute, RequestStatus, Service,
    ServiceDefinition, ServiceDiscoveryInfo, ServiceRequest, ServiceRequestIdResponse, ServiceType,
};
