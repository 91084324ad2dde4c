//! The JSONPlaceholder case catalog.
//!
//! Cases are listed in the order they run. Each carries the assertions
//! the service is expected to satisfy.

use probe_domain::{Assertion, ComparisonOperator, DomainResult, TestCase};

const POST_11_TITLE: &str = "et ea vero quia laudantium autem";
const POST_11_BODY_FRAGMENT: &str = "delectus reiciendis molestiae occaecati";

/// Returns the JSONPlaceholder catalog in declared run order.
///
/// # Errors
///
/// Returns an error if a body selector fails to parse.
pub fn jsonplaceholder_cases() -> DomainResult<Vec<TestCase>> {
    Ok(vec![
        TestCase::get("GET /posts/2 - post fields", "/posts/2")
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("id", 2)?)
            .expect(Assertion::body_equals("userId", 1)?)
            .expect(Assertion::body_not_empty("title")?)
            .expect(Assertion::body_not_empty("body")?),
        TestCase::get("GET /posts - find post 11", "/posts")
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("size()", 100)?)
            .expect(Assertion::body_equals("find { it.id == 11 }.userId", 2)?)
            .expect(Assertion::body_equals(
                "find { it.id == 11 }.title",
                POST_11_TITLE,
            )?)
            .expect(Assertion::body(
                "find { it.id == 11 }.body",
                ComparisonOperator::Contains,
                POST_11_BODY_FRAGMENT,
            )?),
        TestCase::get("GET /posts/2/comments", "/posts/2/comments")
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body("size()", ComparisonOperator::GreaterThan, 0)?)
            .expect(Assertion::body_equals("[0].postId", 2)?)
            .expect(Assertion::body(
                "[0].email",
                ComparisonOperator::Contains,
                "@",
            )?),
        TestCase::get("GET /comments?postId=2", "comments")
            .with_query("postId", "2")
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body("size()", ComparisonOperator::GreaterThan, 0)?)
            .expect(Assertion::body(
                "postId",
                ComparisonOperator::every_item(ComparisonOperator::Equals),
                2,
            )?),
        TestCase::post("POST /posts", "/posts")
            .with_json_body(r#"{"title": "Claudia", "body": "Hello world", "userId": 9}"#)
            .expect(Assertion::status(201))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("id", 101)?)
            .expect(Assertion::body_equals("title", "Claudia")?)
            .expect(Assertion::body_equals("body", "Hello world")?)
            .expect(Assertion::body_equals("userId", 9)?),
        TestCase::put("PUT /posts/25 - full update", "/posts/25")
            .with_json_body(
                r#"{
    "id": 25,
    "title": "Nou titlu pentru postarea 25",
    "body": "Acesta este un body actualizat",
    "userId": 5
}"#,
            )
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("id", 25)?)
            .expect(Assertion::body_equals("title", "Nou titlu pentru postarea 25")?)
            .expect(Assertion::body_equals("body", "Acesta este un body actualizat")?)
            .expect(Assertion::body_equals("userId", 5)?),
        // title and userId are left unchecked
        TestCase::patch("PATCH /posts/25 - partial update", "/posts/25")
            .with_json_body(r#"{"body": "acesta este body-ul nou pentru postarea 25"}"#)
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("id", 25)?)
            .expect(Assertion::body_equals(
                "body",
                "acesta este body-ul nou pentru postarea 25",
            )?),
        TestCase::delete("DELETE /posts/10", "/posts/10").expect(Assertion::status(200)),
        TestCase::get("GET /nu-exista - unknown endpoint", "/nu-exista")
            .negative()
            .expect(Assertion::status(404)),
        TestCase::post("POST /posts - empty body", "/posts")
            .negative()
            .with_json_body("{}")
            .with_note("JSONPlaceholder accepts an empty object and answers 201")
            .expect(Assertion::status(201)),
        TestCase::delete("DELETE /posts/9999 - unknown post", "/posts/9999")
            .negative()
            .with_note("JSONPlaceholder answers 200 when deleting an id that does not exist")
            .expect(Assertion::status(200)),
        TestCase::get("GET /users/5 - user name", "/users/5")
            .expect(Assertion::status(200))
            .expect(Assertion::content_type_json())
            .expect(Assertion::body_equals("id", 5)?)
            .expect(Assertion::body_not_empty("name")?),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use probe_domain::{Category, HttpMethod};

    #[test]
    fn test_catalog_order() {
        let cases = jsonplaceholder_cases().unwrap();
        let methods: Vec<_> = cases.iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Get,
                HttpMethod::Get,
                HttpMethod::Get,
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete,
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Delete,
                HttpMethod::Get,
            ]
        );
    }

    #[test]
    fn test_negative_cases() {
        let cases = jsonplaceholder_cases().unwrap();
        let negative: Vec<_> = cases
            .iter()
            .filter(|c| c.category == Category::Negative)
            .map(|c| c.path.as_str())
            .collect();
        assert_eq!(negative, vec!["/nu-exista", "/posts", "/posts/9999"]);
    }

    #[test]
    fn test_quirk_cases_are_documented() {
        let cases = jsonplaceholder_cases().unwrap();
        let noted: Vec<_> = cases
            .iter()
            .filter(|c| c.note.is_some())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            noted,
            vec!["POST /posts - empty body", "DELETE /posts/9999 - unknown post"]
        );
    }

    #[test]
    fn test_every_body_is_valid_json() {
        for case in jsonplaceholder_cases().unwrap() {
            assert!(case.body.validate().is_ok(), "{} has an invalid body", case.name);
        }
    }

    #[test]
    fn test_every_case_has_a_status_assertion() {
        for case in jsonplaceholder_cases().unwrap() {
            assert!(
                case.assertions.first().is_some_and(Assertion::is_status),
                "{} does not check its status first",
                case.name
            );
        }
    }
}
