use ocs_core::error::ExtractError;
use ocs_core::extract::{auth, materialize_auth, select_examples};
use ocs_core::parse;
use ocs_core::parse::operation::HttpMethod;
use ocs_core::parse::ref_resolve::RefResolver;
use ocs_core::parse::spec::OpenApiSpec;
use serde_json::json;

fn load(yaml: &str) -> OpenApiSpec {
    let spec = parse::from_yaml(yaml).expect("fixture should parse");
    let mut resolver = RefResolver::new(&spec);
    resolver
        .resolve_spec(&spec)
        .expect("fixture should resolve")
}

const PETSTORE_BODY: &str = r#"
openapi: "3.0.0"
info:
  title: Swagger Petstore
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                name:
                  type: string
                breed:
                  type: string
              example:
                name: doggie
                breed: labrador
      responses:
        "200":
          description: pet created
"#;

#[test]
fn selects_schema_example_as_body() {
    let spec = load(PETSTORE_BODY);
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let shape = select_examples(op).unwrap();
    assert_eq!(
        shape.body,
        Some(json!({"name": "doggie", "breed": "labrador"}))
    );
    assert!(shape.path.is_empty());
    assert!(shape.query.is_empty());
}

#[test]
fn synthesizes_body_from_schema_without_example() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Swagger Petstore
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                asdf:
                  type: string
                count:
                  type: integer
                active:
                  type: boolean
      responses:
        "200":
          description: pet created
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let shape = select_examples(op).unwrap();
    assert_eq!(
        shape.body,
        Some(json!({"asdf": "string", "count": 0, "active": true}))
    );
}

#[test]
fn media_type_example_wins_over_schema_synthesis() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                name:
                  type: string
            example:
              name: explicit
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let shape = select_examples(op).unwrap();
    assert_eq!(shape.body, Some(json!({"name": "explicit"})));
}

#[test]
fn single_named_body_example_is_used() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            examples:
              only:
                value:
                  name: doggie
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let shape = select_examples(op).unwrap();
    assert_eq!(shape.body, Some(json!({"name": "doggie"})));
}

#[test]
fn multiple_content_types_are_ambiguous() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            example:
              name: doggie
          application/xml:
            example:
              name: doggie
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let err = select_examples(op).unwrap_err();
    assert_eq!(err, ExtractError::MultipleBodySources);
    assert_eq!(
        err.to_string(),
        "Multiple requestBodyExamples are not supported"
    );
}

#[test]
fn multiple_named_body_examples_are_ambiguous() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            examples:
              doggie:
                value:
                  name: doggie
              kitty:
                value:
                  name: kitty
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let err = select_examples(op).unwrap_err();
    assert_eq!(err, ExtractError::MultipleBodyExamples);
    assert_eq!(
        err.to_string(),
        "Multiple requestBodyExamples[0].examples are not supported"
    );
}

#[test]
fn parameter_examples_land_in_location_buckets() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets/{petId}:
    get:
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
          example: "123"
        - name: limit
          in: query
          schema:
            type: integer
          example: 10
        - name: X-Trace
          in: header
          schema:
            type: string
          example: abc
        - name: session
          in: cookie
          schema:
            type: string
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets/{petId}"].operation(HttpMethod::Get).unwrap();

    let shape = select_examples(op).unwrap();
    assert!(shape.body.is_none());
    assert_eq!(shape.path["petId"], json!("123"));
    assert_eq!(shape.query["limit"], json!(10));
    assert_eq!(shape.header["X-Trace"], json!("abc"));
    // No example on the cookie parameter, so its bucket stays empty.
    assert!(shape.cookie.is_empty());
}

#[test]
fn named_parameter_examples_are_fatal_even_with_single_example() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets/{petId}:
    get:
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
          example: "123"
          examples:
            first:
              value: "123"
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets/{petId}"].operation(HttpMethod::Get).unwrap();

    let err = select_examples(op).unwrap_err();
    assert_eq!(err, ExtractError::MultipleParameterExamples);
    assert_eq!(
        err.to_string(),
        "Multiple parameter examples are not supported"
    );
}

#[test]
fn example_groups_fail_before_anything_else() {
    // The body is also ambiguous here; the group check must win.
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    post:
      x-exampleGroups:
        happy-path:
          summary: A full example
          body:
            name: doggie
      requestBody:
        content:
          application/json:
            example:
              name: doggie
          application/xml:
            example:
              name: doggie
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let err = select_examples(op).unwrap_err();
    assert_eq!(err, ExtractError::ExampleGroups);
    assert_eq!(err.to_string(), "Multiple example groups are not supported");
}

#[test]
fn component_schema_example_survives_dereferencing() {
    let spec = load(
        r##"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
      example:
        name: doggie
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Pet"
      responses:
        "200":
          description: ok
"##,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Post).unwrap();

    let shape = select_examples(op).unwrap();
    assert_eq!(shape.body, Some(json!({"name": "doggie"})));
}

const SECURED: &str = r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
components:
  securitySchemes:
    apiKey:
      type: apiKey
      in: header
      name: X-API-Key
    oauth-main:
      type: oauth2
paths:
  /pets:
    get:
      security:
        - apiKey: []
        - apiKey: []
          oauth-main: []
      responses:
        "200":
          description: ok
  /toys:
    get:
      responses:
        "200":
          description: ok
"#;

#[test]
fn placeholders_are_deterministic_and_deduplicated() {
    let spec = load(SECURED);
    let op = spec.paths["/pets"].operation(HttpMethod::Get).unwrap();

    let materials = materialize_auth(&spec, op);
    // apiKey appears in both alternative groups; one entry survives.
    assert_eq!(materials.len(), 2);
    assert_eq!(materials["apiKey"], "MY_APIKEY");
    assert_eq!(materials["oauth-main"], "MY_OAUTH_MAIN");

    // Same input, same output.
    assert_eq!(materialize_auth(&spec, op), materials);
}

#[test]
fn placeholder_sanitizes_and_uppercases() {
    assert_eq!(auth::placeholder("apiKey"), "MY_APIKEY");
    assert_eq!(auth::placeholder("petstore_auth"), "MY_PETSTORE_AUTH");
    assert_eq!(auth::placeholder("my.weird key!"), "MY_MY_WEIRD_KEY_");
}

#[test]
fn operation_without_security_gets_no_materials() {
    let spec = load(SECURED);
    let op = spec.paths["/toys"].operation(HttpMethod::Get).unwrap();
    assert!(materialize_auth(&spec, op).is_empty());
}

#[test]
fn document_security_applies_when_operation_declares_none() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
security:
  - apiKey: []
components:
  securitySchemes:
    apiKey:
      type: apiKey
      in: header
      name: X-API-Key
paths:
  /pets:
    get:
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Get).unwrap();

    let materials = materialize_auth(&spec, op);
    assert_eq!(materials["apiKey"], "MY_APIKEY");
}

#[test]
fn unknown_scheme_keys_are_skipped() {
    let spec = load(
        r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0.0"
paths:
  /pets:
    get:
      security:
        - ghost: []
      responses:
        "200":
          description: ok
"#,
    );
    let op = spec.paths["/pets"].operation(HttpMethod::Get).unwrap();
    assert!(materialize_auth(&spec, op).is_empty());
}
