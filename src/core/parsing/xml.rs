use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::core::dates::DateCodec;
use crate::core::parsing::{tags, WireCodec};
use crate::domain::model::{
    parse_format_list, AttributeDatatype, AttributeInfo, AttributeValue, Endpoint, EndpointType,
    Format, PostServiceRequestResponse, ProtocolError, RequestStatus, Service, ServiceDefinition,
    ServiceDiscoveryInfo, ServiceRequest, ServiceRequestIdResponse, ServiceType,
};
use crate::utils::error::{Open311Error, Result};

/// Structured-markup codec. Documents are read into a small element tree and
/// assembled field by field against the shared tag table, mirroring the
/// per-field default policy of the object-notation codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

// ---------------------------------------------------------------------------
// Element tree
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    fn text_or_default(&self, name: &str) -> String {
        self.child_text(name).unwrap_or_default().to_string()
    }

    fn require_text(&self, name: &str) -> Result<String> {
        match self.child_text(name) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(Open311Error::parse_failure(format!(
                "mandatory field <{}> is missing",
                name
            ))),
        }
    }
}

fn text_failure<E: std::fmt::Display>(err: E) -> Open311Error {
    Open311Error::parse_failure(err.to_string())
}

fn parse_document(raw: &str) -> Result<Element> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => {
                decl.version().map_err(text_failure)?;
            }
            Event::Start(start) => {
                if root.is_some() {
                    return Err(Open311Error::parse_failure(
                        "content after the document root",
                    ));
                }
                stack.push(Element {
                    name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                    ..Element::default()
                });
            }
            Event::Empty(start) => {
                let element = Element {
                    name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
                    ..Element::default()
                };
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let decoded = text.unescape().map_err(text_failure)?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(&decoded),
                    None => {
                        return Err(Open311Error::parse_failure(
                            "text outside of the document root",
                        ))
                    }
                }
            }
            Event::CData(data) => match stack.last_mut() {
                Some(open) => open
                    .text
                    .push_str(&String::from_utf8_lossy(data.as_ref())),
                None => {
                    return Err(Open311Error::parse_failure(
                        "text outside of the document root",
                    ))
                }
            },
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Open311Error::parse_failure("unexpected closing tag"))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Open311Error::parse_failure("unclosed element"));
    }
    root.ok_or_else(|| Open311Error::parse_failure("document has no root element"))
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Open311Error::parse_failure(
            "content after the document root",
        ));
    }
    *root = Some(element);
    Ok(())
}

fn expect_root<'a>(document: &'a Element, name: &str) -> Result<&'a Element> {
    if document.name == name {
        Ok(document)
    } else {
        Err(Open311Error::parse_failure(format!(
            "expected <{}> document root, found <{}>",
            name, document.name
        )))
    }
}

// ---------------------------------------------------------------------------
// Field assembly
// ---------------------------------------------------------------------------

fn parse_bool(token: Option<&str>) -> bool {
    token.is_some_and(|t| t.trim().eq_ignore_ascii_case("true"))
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>) -> Option<T> {
    token.and_then(|t| t.trim().parse().ok())
}

fn parse_date(token: Option<&str>) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    token.and_then(|t| DateCodec::new().parse(t))
}

fn service_from_element(element: &Element) -> Result<Service> {
    Ok(Service {
        service_code: element.require_text(tags::SERVICE_CODE)?,
        service_name: element.text_or_default(tags::SERVICE_NAME),
        description: element.text_or_default(tags::DESCRIPTION),
        metadata: parse_bool(element.child_text(tags::METADATA)),
        service_type: element.child_text(tags::TYPE).and_then(ServiceType::parse),
        keywords: element.text_or_default(tags::KEYWORDS),
        group: element.text_or_default(tags::GROUP),
    })
}

fn attribute_from_element(element: &Element) -> Result<AttributeInfo> {
    let values = element
        .child(tags::VALUES)
        .map(|values| {
            values
                .children_named(tags::VALUE)
                .map(|value| AttributeValue {
                    key: value.text_or_default(tags::KEY),
                    name: value.text_or_default(tags::NAME),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(AttributeInfo {
        variable: parse_bool(element.child_text(tags::VARIABLE)),
        code: element.text_or_default(tags::CODE),
        datatype: element
            .child_text(tags::DATATYPE)
            .and_then(AttributeDatatype::parse)
            .unwrap_or_default(),
        required: parse_bool(element.child_text(tags::REQUIRED)),
        datatype_description: element.text_or_default(tags::DATATYPE_DESCRIPTION),
        order: parse_number(element.child_text(tags::ORDER)),
        description: element.text_or_default(tags::DESCRIPTION),
        values,
    })
}

fn request_from_element(element: &Element) -> Result<ServiceRequest> {
    Ok(ServiceRequest {
        service_request_id: element.require_text(tags::SERVICE_REQUEST_ID)?,
        status: element
            .child_text(tags::STATUS)
            .and_then(RequestStatus::parse),
        status_notes: element.text_or_default(tags::STATUS_NOTES),
        service_name: element.text_or_default(tags::SERVICE_NAME),
        service_code: element.text_or_default(tags::SERVICE_CODE),
        description: element.text_or_default(tags::DESCRIPTION),
        agency_responsible: element.text_or_default(tags::AGENCY_RESPONSIBLE),
        service_notice: element.text_or_default(tags::SERVICE_NOTICE),
        requested_datetime: parse_date(element.child_text(tags::REQUESTED_DATETIME)),
        updated_datetime: parse_date(element.child_text(tags::UPDATED_DATETIME)),
        expected_datetime: parse_date(element.child_text(tags::EXPECTED_DATETIME)),
        address: element.text_or_default(tags::ADDRESS),
        address_id: parse_number(element.child_text(tags::ADDRESS_ID)),
        zipcode: parse_number(element.child_text(tags::ZIPCODE)),
        latitude: parse_number(element.child_text(tags::LATITUDE)),
        longitude: parse_number(element.child_text(tags::LONGITUDE)),
        media_url: element
            .child_text(tags::MEDIA_URL)
            .and_then(|text| url::Url::parse(text.trim()).ok()),
    })
}

fn endpoint_from_element(element: &Element) -> Result<Endpoint> {
    let format_tokens: Vec<&str> = element
        .child(tags::FORMATS)
        .map(|formats| {
            formats
                .children_named(tags::FORMAT)
                .map(|format| format.text.as_str())
                .collect()
        })
        .unwrap_or_default();

    Ok(Endpoint {
        specification_url: element.text_or_default(tags::SPECIFICATION),
        url: element.text_or_default(tags::URL),
        changeset: parse_date(element.child_text(tags::CHANGESET)),
        endpoint_type: element
            .child_text(tags::TYPE)
            .and_then(EndpointType::parse)
            .unwrap_or_default(),
        formats: parse_format_list(format_tokens.into_iter()),
    })
}

// ---------------------------------------------------------------------------
// Document writing
// ---------------------------------------------------------------------------

type DocWriter = Writer<Cursor<Vec<u8>>>;

fn new_document() -> Result<DocWriter> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(text_failure)?;
    Ok(writer)
}

fn finish(writer: DocWriter) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Open311Error::parse_failure(e.to_string()))
}

fn open(writer: &mut DocWriter, tag: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(text_failure)
}

fn close(writer: &mut DocWriter, tag: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(text_failure)
}

fn text_element(writer: &mut DocWriter, tag: &str, text: &str) -> Result<()> {
    open(writer, tag)?;
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(text_failure)?;
    }
    close(writer, tag)
}

fn optional_text_element(writer: &mut DocWriter, tag: &str, text: Option<&str>) -> Result<()> {
    match text {
        Some(text) => text_element(writer, tag, text),
        None => Ok(()),
    }
}

fn optional_date_element(
    writer: &mut DocWriter,
    tag: &str,
    timestamp: &Option<chrono::DateTime<chrono::FixedOffset>>,
) -> Result<()> {
    match timestamp {
        Some(timestamp) => text_element(writer, tag, &DateCodec::new().print(timestamp)),
        None => Ok(()),
    }
}

fn bool_element(writer: &mut DocWriter, tag: &str, value: bool) -> Result<()> {
    text_element(writer, tag, if value { "true" } else { "false" })
}

fn write_service(writer: &mut DocWriter, service: &Service) -> Result<()> {
    open(writer, tags::SERVICE)?;
    text_element(writer, tags::SERVICE_CODE, &service.service_code)?;
    text_element(writer, tags::SERVICE_NAME, &service.service_name)?;
    text_element(writer, tags::DESCRIPTION, &service.description)?;
    bool_element(writer, tags::METADATA, service.metadata)?;
    optional_text_element(
        writer,
        tags::TYPE,
        service.service_type.map(|t| t.wire_token()),
    )?;
    text_element(writer, tags::KEYWORDS, &service.keywords)?;
    text_element(writer, tags::GROUP, &service.group)?;
    close(writer, tags::SERVICE)
}

fn write_attribute(writer: &mut DocWriter, attribute: &AttributeInfo) -> Result<()> {
    open(writer, tags::ATTRIBUTE)?;
    bool_element(writer, tags::VARIABLE, attribute.variable)?;
    text_element(writer, tags::CODE, &attribute.code)?;
    text_element(writer, tags::DATATYPE, attribute.datatype.wire_token())?;
    bool_element(writer, tags::REQUIRED, attribute.required)?;
    text_element(
        writer,
        tags::DATATYPE_DESCRIPTION,
        &attribute.datatype_description,
    )?;
    optional_text_element(
        writer,
        tags::ORDER,
        attribute.order.map(|o| o.to_string()).as_deref(),
    )?;
    text_element(writer, tags::DESCRIPTION, &attribute.description)?;
    if !attribute.values.is_empty() {
        open(writer, tags::VALUES)?;
        for value in &attribute.values {
            open(writer, tags::VALUE)?;
            text_element(writer, tags::KEY, &value.key)?;
            text_element(writer, tags::NAME, &value.name)?;
            close(writer, tags::VALUE)?;
        }
        close(writer, tags::VALUES)?;
    }
    close(writer, tags::ATTRIBUTE)
}

fn write_request(writer: &mut DocWriter, request: &ServiceRequest) -> Result<()> {
    open(writer, tags::REQUEST)?;
    text_element(writer, tags::SERVICE_REQUEST_ID, &request.service_request_id)?;
    optional_text_element(writer, tags::STATUS, request.status.map(|s| s.wire_token()))?;
    text_element(writer, tags::STATUS_NOTES, &request.status_notes)?;
    text_element(writer, tags::SERVICE_NAME, &request.service_name)?;
    text_element(writer, tags::SERVICE_CODE, &request.service_code)?;
    text_element(writer, tags::DESCRIPTION, &request.description)?;
    text_element(writer, tags::AGENCY_RESPONSIBLE, &request.agency_responsible)?;
    text_element(writer, tags::SERVICE_NOTICE, &request.service_notice)?;
    optional_date_element(writer, tags::REQUESTED_DATETIME, &request.requested_datetime)?;
    optional_date_element(writer, tags::UPDATED_DATETIME, &request.updated_datetime)?;
    optional_date_element(writer, tags::EXPECTED_DATETIME, &request.expected_datetime)?;
    text_element(writer, tags::ADDRESS, &request.address)?;
    optional_text_element(
        writer,
        tags::ADDRESS_ID,
        request.address_id.map(|v| v.to_string()).as_deref(),
    )?;
    optional_text_element(
        writer,
        tags::ZIPCODE,
        request.zipcode.map(|v| v.to_string()).as_deref(),
    )?;
    optional_text_element(
        writer,
        tags::LATITUDE,
        request.latitude.map(|v| v.to_string()).as_deref(),
    )?;
    optional_text_element(
        writer,
        tags::LONGITUDE,
        request.longitude.map(|v| v.to_string()).as_deref(),
    )?;
    optional_text_element(
        writer,
        tags::MEDIA_URL,
        request.media_url.as_ref().map(url::Url::as_str),
    )?;
    close(writer, tags::REQUEST)
}

fn write_endpoint(writer: &mut DocWriter, endpoint: &Endpoint) -> Result<()> {
    open(writer, tags::ENDPOINT)?;
    text_element(writer, tags::SPECIFICATION, &endpoint.specification_url)?;
    text_element(writer, tags::URL, &endpoint.url)?;
    optional_date_element(writer, tags::CHANGESET, &endpoint.changeset)?;
    text_element(writer, tags::TYPE, endpoint.endpoint_type.wire_token())?;
    open(writer, tags::FORMATS)?;
    for format in &endpoint.formats {
        text_element(writer, tags::FORMAT, format.content_type())?;
    }
    close(writer, tags::FORMATS)?;
    close(writer, tags::ENDPOINT)
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

impl WireCodec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn decode_service_list(&self, raw: &str) -> Result<Vec<Service>> {
        let document = parse_document(raw)?;
        expect_root(&document, tags::SERVICES)?
            .children_named(tags::SERVICE)
            .map(service_from_element)
            .collect()
    }

    fn decode_service_definition(&self, raw: &str) -> Result<ServiceDefinition> {
        let document = parse_document(raw)?;
        let root = expect_root(&document, tags::SERVICE_DEFINITION)?;
        let attributes = root
            .child(tags::ATTRIBUTES)
            .map(|attributes| {
                attributes
                    .children_named(tags::ATTRIBUTE)
                    .map(attribute_from_element)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();
        Ok(ServiceDefinition {
            service_code: root.require_text(tags::SERVICE_CODE)?,
            attributes,
        })
    }

    fn decode_request_id_from_token(&self, raw: &str) -> Result<ServiceRequestIdResponse> {
        let document = parse_document(raw)?;
        let request = expect_root(&document, tags::SERVICE_REQUESTS)?
            .children_named(tags::REQUEST)
            .next()
            .ok_or_else(|| {
                Open311Error::parse_failure("payload contains no service request id record")
            })?;
        Ok(ServiceRequestIdResponse {
            service_request_id: request.require_text(tags::SERVICE_REQUEST_ID)?,
            token: request.text_or_default(tags::TOKEN),
        })
    }

    fn decode_service_requests(&self, raw: &str) -> Result<Vec<ServiceRequest>> {
        let document = parse_document(raw)?;
        expect_root(&document, tags::SERVICE_REQUESTS)?
            .children_named(tags::REQUEST)
            .map(request_from_element)
            .collect()
    }

    fn decode_post_service_request_response(
        &self,
        raw: &str,
    ) -> Result<PostServiceRequestResponse> {
        let document = parse_document(raw)?;
        let request = expect_root(&document, tags::SERVICE_REQUESTS)?
            .children_named(tags::REQUEST)
            .next()
            .ok_or_else(|| {
                Open311Error::parse_failure("payload contains no post service request record")
            })?;
        Ok(PostServiceRequestResponse {
            service_request_id: request.require_text(tags::SERVICE_REQUEST_ID)?,
            token: request.text_or_default(tags::TOKEN),
            service_notice: request.text_or_default(tags::SERVICE_NOTICE),
            account_id: request.text_or_default(tags::ACCOUNT_ID),
        })
    }

    fn decode_error(&self, raw: &str) -> Result<ProtocolError> {
        let document = parse_document(raw)?;
        let error = expect_root(&document, tags::ERRORS)?
            .children_named(tags::ERROR)
            .next()
            .ok_or_else(|| Open311Error::parse_failure("payload contains no error record"))?;
        Ok(ProtocolError {
            code: error.text_or_default(tags::CODE),
            description: error.text_or_default(tags::DESCRIPTION),
        })
    }

    fn decode_service_discovery(&self, raw: &str) -> Result<ServiceDiscoveryInfo> {
        let document = parse_document(raw)?;
        let root = expect_root(&document, tags::DISCOVERY)?;
        let endpoints = root
            .child(tags::ENDPOINTS)
            .map(|endpoints| {
                endpoints
                    .children_named(tags::ENDPOINT)
                    .map(endpoint_from_element)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();
        Ok(ServiceDiscoveryInfo {
            changeset: parse_date(root.child_text(tags::CHANGESET)),
            contact: root.text_or_default(tags::CONTACT),
            key_service: root.text_or_default(tags::KEY_SERVICE),
            endpoints,
        })
    }

    fn encode_service_list(&self, services: &[Service]) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::SERVICES)?;
        for service in services {
            write_service(&mut writer, service)?;
        }
        close(&mut writer, tags::SERVICES)?;
        finish(writer)
    }

    fn encode_service_definition(&self, definition: &ServiceDefinition) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::SERVICE_DEFINITION)?;
        text_element(&mut writer, tags::SERVICE_CODE, &definition.service_code)?;
        open(&mut writer, tags::ATTRIBUTES)?;
        for attribute in &definition.attributes {
            write_attribute(&mut writer, attribute)?;
        }
        close(&mut writer, tags::ATTRIBUTES)?;
        close(&mut writer, tags::SERVICE_DEFINITION)?;
        finish(writer)
    }

    fn encode_request_id_response(&self, response: &ServiceRequestIdResponse) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::SERVICE_REQUESTS)?;
        open(&mut writer, tags::REQUEST)?;
        text_element(
            &mut writer,
            tags::SERVICE_REQUEST_ID,
            &response.service_request_id,
        )?;
        text_element(&mut writer, tags::TOKEN, &response.token)?;
        close(&mut writer, tags::REQUEST)?;
        close(&mut writer, tags::SERVICE_REQUESTS)?;
        finish(writer)
    }

    fn encode_service_requests(&self, requests: &[ServiceRequest]) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::SERVICE_REQUESTS)?;
        for request in requests {
            write_request(&mut writer, request)?;
        }
        close(&mut writer, tags::SERVICE_REQUESTS)?;
        finish(writer)
    }

    fn encode_post_service_request_response(
        &self,
        response: &PostServiceRequestResponse,
    ) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::SERVICE_REQUESTS)?;
        open(&mut writer, tags::REQUEST)?;
        text_element(
            &mut writer,
            tags::SERVICE_REQUEST_ID,
            &response.service_request_id,
        )?;
        text_element(&mut writer, tags::TOKEN, &response.token)?;
        text_element(&mut writer, tags::SERVICE_NOTICE, &response.service_notice)?;
        text_element(&mut writer, tags::ACCOUNT_ID, &response.account_id)?;
        close(&mut writer, tags::REQUEST)?;
        close(&mut writer, tags::SERVICE_REQUESTS)?;
        finish(writer)
    }

    fn encode_error(&self, error: &ProtocolError) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::ERRORS)?;
        open(&mut writer, tags::ERROR)?;
        text_element(&mut writer, tags::CODE, &error.code)?;
        text_element(&mut writer, tags::DESCRIPTION, &error.description)?;
        close(&mut writer, tags::ERROR)?;
        close(&mut writer, tags::ERRORS)?;
        finish(writer)
    }

    fn encode_service_discovery(&self, discovery: &ServiceDiscoveryInfo) -> Result<String> {
        let mut writer = new_document()?;
        open(&mut writer, tags::DISCOVERY)?;
        optional_date_element(&mut writer, tags::CHANGESET, &discovery.changeset)?;
        text_element(&mut writer, tags::CONTACT, &discovery.contact)?;
        text_element(&mut writer, tags::KEY_SERVICE, &discovery.key_service)?;
        open(&mut writer, tags::ENDPOINTS)?;
        for endpoint in &discovery.endpoints {
            write_endpoint(&mut writer, endpoint)?;
        }
        close(&mut writer, tags::ENDPOINTS)?;
        close(&mut writer, tags::DISCOVERY)?;
        finish(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_trailing_content() {
        let raw = "<?xml version=\"1.0\" encoding=\"utf-8\"?><services></services>ERRORSTRING";
        assert!(XmlCodec.decode_service_list(raw).is_err());
    }

    #[test]
    fn rejects_wrong_document_root() {
        let raw = "<?xml version=\"1.0\" encoding=\"utf-8\"?><errors></errors>";
        assert!(XmlCodec.decode_service_list(raw).is_err());
    }

    #[test]
    fn empty_elements_decode_to_empty_strings() {
        let raw = "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_requests><request>\
                   <service_request_id>1</service_request_id><account_id/></request>\
                   </service_requests>";
        let response = XmlCodec.decode_post_service_request_response(raw).unwrap();
        assert_eq!(response.service_request_id, "1");
        assert_eq!(response.token, "");
        assert_eq!(response.account_id, "");
    }

    #[test]
    fn missing_mandatory_id_is_a_parse_failure() {
        let raw = "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_requests><request>\
                   <token>12345</token></request></service_requests>";
        assert!(XmlCodec.decode_request_id_from_token(raw).is_err());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let raw = "<?xml version=\"1.0\" encoding=\"utf-8\"?><errors><error><code>403</code>\
                   <description>bad &amp; worse</description></error></errors>";
        let error = XmlCodec.decode_error(raw).unwrap();
        assert_eq!(error.description, "bad & worse");
    }
}
