
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the client:
// - smoke_tests: Config defaults and the terminal session loop
// - backend_mock: Session flows against an in-memory backend and platform
// - http_backend: The HTTP backend against an in-process server
