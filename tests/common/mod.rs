#![allow(dead_code)]

//! Canned server payloads shared by the integration tests, one pair per
//! GeoReport message type.

pub fn service_list_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><services><service><service_code>\
     001</service_code><service_name>Cans left out 24x7</service_name><description>\
     Garbage or recycling cans that have been left out for more than 24 hours after \
     collection. Violators will be cited.</description><metadata>true</metadata>\
     <type>realtime</type><keywords>lorem, ipsum, dolor</keywords><group>sanitation\
     </group></service><service><service_code>002</service_code><metadata>true</metadata>\
     <type>realtime</type><keywords>lorem, ipsum, dolor</keywords><group>street</group>\
     <service_name>Construction plate shifted</service_name>\
     <description>Metal construction plate covering the street or sidewalk has been moved.\
     </description></service></services>"
}

pub fn service_list_json() -> &'static str {
    r#"[{"service_code":"001","service_name":"Cans left out 24x7","description":"Garbage or recycling cans that have been left out for more than 24 hours after collection. Violators will be cited.","metadata":true,"type":"realtime","keywords":"lorem, ipsum, dolor","group":"sanitation"},{"service_code":"002","service_name":"Construction plate shifted","description":"Metal construction plate covering the street or sidewalk has been moved.","metadata":true,"type":"realtime","keywords":"lorem, ipsum, dolor","group":"street"}]"#
}

pub fn service_definition_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_definition>\
     <service_code>DMV66</service_code><attributes><attribute>\
     <variable>true</variable><code>WHISHETN</code><datatype>singlevaluelist</datatype>\
     <required>true</required><datatype_description></datatype_description><order>1</order>\
     <description>What is the ticket/tag/DL number?</description><values><value>\
     <key>123</key><name>Ford</name></value><value><key>124</key><name>Chrysler</name>\
     </value></values></attribute></attributes></service_definition>"
}

pub fn service_definition_json() -> &'static str {
    r#"{"service_code":"DMV66","attributes":[{"variable":true,"code":"WHISHETN","datatype":"singlevaluelist","required":true,"order":1,"description":"What is the ticket/tag/DL number?","values":[{"key":"123","name":"Ford"},{"key":"124","name":"Chrysler"}]}]}"#
}

pub fn request_id_from_token_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_requests>\
     <request><service_request_id>638344</service_request_id>\
     <token>12345</token></request></service_requests>"
}

pub fn request_id_from_token_json() -> &'static str {
    r#"[{"service_request_id":"638344","token":"12345"},{"service_request_id":"111","token":"12345"}]"#
}

pub fn service_requests_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_requests>\
     <request><service_request_id>638344</service_request_id>\
     <status>closed</status><status_notes>Duplicate request.\
     </status_notes><service_name>Sidewalk and Curb Issues</service_name>\
     <service_code>006</service_code><description></description>\
     <agency_responsible></agency_responsible><service_notice></service_notice>\
     <requested_datetime>2010-04-14T06:37:38-08:00</requested_datetime>\
     <updated_datetime>2010-04-14T06:37:38-08:00</updated_datetime>\
     <expected_datetime>2010-04-15T06:37:38-08:00</expected_datetime><address>\
     8TH AVE and JUDAH ST</address>\
     <address_id>545483</address_id><zipcode>94122</zipcode>\
     <lat>37.762221815</lat><long>-122.4651145</long>\
     <media_url>http://city.gov.s3.amazonaws.com/requests/media/638344.jpg \
     </media_url></request>\
     <request><service_request_id>638349</service_request_id><status>open</status>\
     <status_notes></status_notes><service_name>Sidewalk and Curb Issues</service_name>\
     <service_code>006</service_code><description></description><agency_responsible>\
     </agency_responsible>\
     <service_notice></service_notice><requested_datetime>2010-04-19T06:37:38-08:00\
     </requested_datetime><updated_datetime>2010-04-19T06:37:38-08:00</updated_datetime>\
     <expected_datetime>2010-04-19T06:37:38-08:00</expected_datetime>\
     <address>8TH AVE and JUDAH ST</address><address_id>545483\
     </address_id><zipcode>94122</zipcode>\
     <lat>37.762221815</lat><long>-122.4651145</long>\
     <media_url>http://city.gov.s3.amazonaws.com/requests/media/638349.jpg </media_url>\
     </request></service_requests>"
}

pub fn service_requests_json() -> &'static str {
    r#"[{"service_request_id":"638344","status":"closed","status_notes":"Duplicate request.","service_name":"Sidewalk and Curb Issues","service_code":"006","requested_datetime":"2010-04-14T06:37:38-08:00","updated_datetime":"2010-04-14T06:37:38-08:00","expected_datetime":"2010-04-15T06:37:38-08:00","address":"8TH AVE and JUDAH ST","address_id":545483,"zipcode":94122,"lat":37.762221815,"long":-122.4651145,"media_url":"http://city.gov.s3.amazonaws.com/requests/media/638344.jpg"},{"service_request_id":"638349","status":"open","service_name":"Sidewalk and Curb Issues","service_code":"006","requested_datetime":"2010-04-19T06:37:38-08:00","updated_datetime":"2010-04-19T06:37:38-08:00","expected_datetime":"2010-04-19T06:37:38-08:00","address":"8TH AVE and JUDAH ST","address_id":545483,"zipcode":94122,"lat":37.762221815,"long":-122.4651145,"media_url":"http://city.gov.s3.amazonaws.com/requests/media/638349.jpg"}]"#
}

pub fn post_service_request_response_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><service_requests><request>\
     <service_request_id>293944</service_request_id><service_notice>\
     The City will inspect and require the responsible party to correct \
     within 24 hours and/or issue a Correction Notice or Notice of Violation \
     of the Public Works Code</service_notice><account_id/></request>\
     </service_requests>"
}

pub fn post_service_request_response_json() -> &'static str {
    r#"[{"service_request_id":"293944","service_notice":"The City will inspect and require the responsible party to correct within 24 hours and/or issue a Correction Notice or Notice of Violation of the Public Works Code"}]"#
}

pub fn error_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><errors><error><code>403</code>\
     <description>Invalid api_key received -- can't proceed with create_request.\
     </description></error></errors>"
}

pub fn error_json() -> &'static str {
    r#"[{"code":"403","description":"Invalid api_key received -- can't proceed with create_request."}]"#
}

pub fn discovery_xml() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"utf-8\"?><discovery>\
     <changeset>2011-04-05T17:48:34Z</changeset><contact>Please email \
     ( content.311@sfgov.org )  or call ( 415-701-2311 ) for assistance \
     or to report bugs</contact><key_service>To get an API_KEY please \
     visit this website:  http://apps.sfgov.org/Open311API/?page_id=486\
     </key_service><endpoints>\
     <endpoint><specification>http://wiki.open311.org/GeoReport_v2\
     </specification><url>https://open311.sfgov.org/dev/v2</url>\
     <changeset>2011-04-20T17:48:34Z</changeset>\
     <type>test</type><formats><format>text/XML</format></formats>\
     </endpoint><endpoint><specification>http://wiki.open311.org/GeoReport_v2</specification>\
     <url>https://open311.sfgov.org/v2</url><changeset>\
     2011-04-25T17:48:34Z</changeset><type>production</type><formats>\
     <format>text/XML</format></formats></endpoint>\
     <endpoint><specification>http://wiki.open311.org/GeoReport_v1</specification>\
     <url>https://open311.sfgov.org/dev/v1</url>\
     <changeset>2011-04-20T17:48:34Z</changeset><type>test</type><formats>\
     <format>text/XML</format></formats></endpoint>\
     <endpoint><specification>http://wiki.open311.org/GeoReport_v1\
     </specification><url>https://open311.sfgov.org/v1</url>\
     <changeset>2011-04-25T17:48:34Z</changeset>\
     <type>production</type><formats><format>text/xml</format></formats>\
     </endpoint></endpoints></discovery>"
}

pub fn discovery_json() -> &'static str {
    r#"{"changeset":"2011-04-05T17:48:34Z","contact":"Please email ( content.311@sfgov.org )  or call ( 415-701-2311 ) for assistance or to report bugs","key_service":"To get an API_KEY please visit this website:  http://apps.sfgov.org/Open311API/?page_id=486","endpoints":[{"specification":"http://wiki.open311.org/GeoReport_v2","url":"https://open311.sfgov.org/dev/v2","changeset":"2011-04-20T17:48:34Z","type":"teSt","formats":["application/json","application/xml"]},{"specification":"http://wiki.open311.org/GeoReport_v2","url":"https://open311.sfgov.org/v2","changeset":"2011-04-25T17:48:34Z","type":"PRODUCTION","formats":["application/json","application/xml"]},{"specification":"http://wiki.open311.org/GeoReport_v1","url":"https://open311.sfgov.org/dev/v1","changeset":"2011-04-20T17:48:34Z","type":"test","formats":["application/json","application/xml"]},{"specification":"http://wiki.open311.org/GeoReport_v1","url":"https://open311.sfgov.org/v1","changeset":"2011-04-25T17:48:34Z","type":"PrOduction","formats":["application/json","application/xml"]}]}"#
}
